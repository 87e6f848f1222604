pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::state::AppState;
use crate::subscriptions::handlers;

/// API routes, with the dashboard's static files served for everything else.
pub fn build_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/user-data", get(handlers::handle_user_data))
        .route(
            "/api/create-subscription",
            post(handlers::handle_create_subscription),
        )
        .route("/api/subscriptions", get(handlers::handle_list_subscriptions))
        .route("/api/plans", get(handlers::handle_plans))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}
