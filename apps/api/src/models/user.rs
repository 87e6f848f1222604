use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A billing customer. `id` doubles as the payment provider's customer id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub id: String,
    pub email: Option<String>,
    pub plan: String,
    pub created_at: DateTime<Utc>,
}
