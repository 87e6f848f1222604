//! Payment provider boundary.
//!
//! Handlers never talk to a provider SDK or HTTP API directly; they go through
//! `AppState.payments`, an `Arc<dyn PaymentProvider>`. Production wires in
//! `StripeClient`, tests wire in an in-process fake.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod stripe;
#[cfg(test)]
pub mod testing;

pub use stripe::StripeClient;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl PaymentError {
    /// The message shown to API callers: the provider's own wording when it
    /// sent one, otherwise the transport error text.
    pub fn provider_message(&self) -> String {
        match self {
            PaymentError::Api { message, .. } => message.clone(),
            PaymentError::Http(e) => e.to_string(),
            PaymentError::Parse(e) => format!("Unexpected provider response: {e}"),
        }
    }
}

/// A subscription as reported by the provider at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderSubscription {
    pub id: String,
    pub status: String,
}

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Creates a recurring subscription for `customer_id` on `price_id`.
    /// Called exactly once per request: no retries, no idempotency key.
    async fn create_subscription(
        &self,
        customer_id: &str,
        price_id: &str,
    ) -> Result<ProviderSubscription, PaymentError>;
}
