//! In-process provider used by tests in place of Stripe.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{PaymentError, PaymentProvider, ProviderSubscription};

/// Accepts the three catalogue prices and rejects anything else the way
/// Stripe does for a missing price.
#[derive(Default)]
pub struct FakeProvider {
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeProvider {
    const KNOWN_PRICES: [&'static str; 3] = ["price_basic", "price_pro", "price_enterprise"];

    /// `(customer_id, price_id)` for every call, in order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentProvider for FakeProvider {
    async fn create_subscription(
        &self,
        customer_id: &str,
        price_id: &str,
    ) -> Result<ProviderSubscription, PaymentError> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((customer_id.to_string(), price_id.to_string()));
            calls.len()
        };

        if !Self::KNOWN_PRICES.contains(&price_id) {
            return Err(PaymentError::Api {
                status: 400,
                message: format!("No such price: '{price_id}'"),
            });
        }

        Ok(ProviderSubscription {
            id: format!("sub_test_{n}"),
            status: "active".to_string(),
        })
    }
}
