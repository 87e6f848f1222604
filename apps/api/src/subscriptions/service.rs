use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{error, info};

use crate::errors::{map_unique_violation, AppError};
use crate::payments::PaymentProvider;
use crate::subscriptions::plans::price_id_for;
use crate::subscriptions::store::{insert_subscription, NewSubscription};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionRequest {
    pub plan: String,
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionResponse {
    pub success: bool,
    pub subscription_id: String,
}

/// Creates the subscription with the provider, then mirrors it locally.
///
/// The provider call happens first and is never rolled back: if the local
/// write fails afterwards, the charge stands and the error is reported.
pub async fn create_subscription(
    db: &SqlitePool,
    payments: &dyn PaymentProvider,
    request: &CreateSubscriptionRequest,
) -> Result<CreateSubscriptionResponse, AppError> {
    let plan = request.plan.trim();
    let user_id = request.user_id.trim();
    if plan.is_empty() {
        return Err(AppError::Validation("plan cannot be empty".to_string()));
    }
    if user_id.is_empty() {
        return Err(AppError::Validation("userId cannot be empty".to_string()));
    }
    let email = request
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty());

    let price_id = price_id_for(plan);
    let provider_sub = payments.create_subscription(user_id, &price_id).await?;

    info!(
        "Provider created subscription {} for user {user_id} on {price_id} (status {})",
        provider_sub.id, provider_sub.status
    );

    let recorded = insert_subscription(
        db,
        NewSubscription {
            user_id,
            email,
            plan,
            provider_subscription_id: &provider_sub.id,
            status: &provider_sub.status,
        },
    )
    .await;

    if let Err(e) = &recorded {
        error!(
            "Provider subscription {} for user {user_id} was created but not recorded locally: {e}",
            provider_sub.id
        );
    }
    recorded.map_err(|e| map_unique_violation(e, "email is already registered to another user"))?;

    Ok(CreateSubscriptionResponse {
        success: true,
        subscription_id: provider_sub.id,
    })
}
