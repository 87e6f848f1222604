//! Axum route handlers for the Subscriptions API.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::subscription::SubscriptionRow;
use crate::state::AppState;
use crate::subscriptions::metrics::{generate_metrics, UserMetrics};
use crate::subscriptions::plans::{plan_tiers, PlanTier};
use crate::subscriptions::service::{
    create_subscription, CreateSubscriptionRequest, CreateSubscriptionResponse,
};
use crate::subscriptions::store::{find_user, list_subscriptions_for_user};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdQuery {
    pub user_id: String,
}

/// GET /api/user-data
///
/// Random display metrics for the dashboard. Not computed from stored data.
pub async fn handle_user_data() -> Json<UserMetrics> {
    Json(generate_metrics(&mut rand::thread_rng()))
}

/// POST /api/create-subscription
///
/// Body rejections (bad JSON, missing or mistyped fields) come back as 400
/// in the usual error envelope.
pub async fn handle_create_subscription(
    State(state): State<AppState>,
    payload: Result<Json<CreateSubscriptionRequest>, JsonRejection>,
) -> Result<Json<CreateSubscriptionResponse>, AppError> {
    let Json(request) = payload?;
    let response = create_subscription(&state.db, state.payments.as_ref(), &request).await?;
    Ok(Json(response))
}

/// GET /api/subscriptions?userId=...
///
/// Locally mirrored subscriptions for a known user, newest first.
pub async fn handle_list_subscriptions(
    State(state): State<AppState>,
    params: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<Json<Vec<SubscriptionRow>>, AppError> {
    let Query(params) = params?;
    if params.user_id.trim().is_empty() {
        return Err(AppError::Validation("userId cannot be empty".to_string()));
    }
    let user_id = params.user_id.trim();
    if find_user(&state.db, user_id).await?.is_none() {
        return Err(AppError::NotFound(format!("User {user_id} not found")));
    }
    let rows = list_subscriptions_for_user(&state.db, user_id).await?;
    Ok(Json(rows))
}

/// GET /api/plans
pub async fn handle_plans() -> Json<Vec<PlanTier>> {
    Json(plan_tiers())
}
