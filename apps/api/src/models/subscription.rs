use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Local mirror of a provider subscription, frozen at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRow {
    pub id: String,
    pub user_id: String,
    pub provider_subscription_id: String,
    pub plan: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
