use std::sync::Arc;

use sqlx::SqlitePool;

use crate::payments::PaymentProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Pluggable payment provider. Production: `StripeClient`.
    pub payments: Arc<dyn PaymentProvider>,
}
