//! Stripe client: creates subscriptions through the Stripe REST API.
//!
//! Requests are form-encoded with bearer auth. Failures are returned as-is;
//! nothing is retried.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{PaymentError, PaymentProvider, ProviderSubscription};

const SUBSCRIPTIONS_PATH: &str = "/v1/subscriptions";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    message: Option<String>,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    secret_key: String,
    api_base: String,
}

impl StripeClient {
    pub fn new(secret_key: String, api_base: &str) -> Result<Self, PaymentError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            secret_key,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn subscriptions_url(&self) -> String {
        format!("{}{}", self.api_base, SUBSCRIPTIONS_PATH)
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    async fn create_subscription(
        &self,
        customer_id: &str,
        price_id: &str,
    ) -> Result<ProviderSubscription, PaymentError> {
        let response = self
            .client
            .post(self.subscriptions_url())
            .bearer_auth(&self.secret_key)
            .form(&subscription_form(customer_id, price_id))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = parse_error_message(&body);
            warn!("Stripe returned {status} for customer {customer_id}: {message}");
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let subscription: ProviderSubscription = serde_json::from_str(&body)?;

        debug!(
            "Stripe subscription created: id={}, status={}",
            subscription.id, subscription.status
        );

        Ok(subscription)
    }
}

/// Form fields for `POST /v1/subscriptions`, using Stripe's bracketed
/// array syntax for line items.
fn subscription_form<'a>(customer_id: &'a str, price_id: &'a str) -> [(&'static str, &'a str); 2] {
    [("customer", customer_id), ("items[0][price]", price_id)]
}

/// Pulls `error.message` out of a Stripe error body, falling back to the
/// error type or the raw body.
fn parse_error_message(body: &str) -> String {
    match serde_json::from_str::<StripeErrorEnvelope>(body) {
        Ok(StripeErrorEnvelope {
            error: StripeErrorBody {
                message: Some(message),
                ..
            },
        }) => message,
        Ok(StripeErrorEnvelope {
            error: StripeErrorBody {
                error_type: Some(error_type),
                ..
            },
        }) => error_type,
        _ if body.trim().is_empty() => "Payment provider request failed".to_string(),
        _ => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::net::SocketAddr;

    use axum::{
        http::{header, HeaderMap, StatusCode},
        routing::post,
        Form, Json, Router,
    };
    use serde_json::{json, Value};

    use super::*;

    const STUB_KEY: &str = "sk_test_stub";

    /// Mimics `POST /v1/subscriptions`: checks the bearer key, knows one price.
    async fn stub_subscriptions(
        headers: HeaderMap,
        Form(form): Form<HashMap<String, String>>,
    ) -> (StatusCode, Json<Value>) {
        let expected_auth = format!("Bearer {STUB_KEY}");
        if headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok())
            != Some(expected_auth.as_str())
        {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": { "message": "Invalid API Key provided", "type": "invalid_request_error" } })),
            );
        }

        let price = form.get("items[0][price]").cloned().unwrap_or_default();
        if price != "price_pro" {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": { "message": format!("No such price: '{price}'") } })),
            );
        }

        (
            StatusCode::OK,
            Json(json!({
                "id": "sub_9",
                "object": "subscription",
                "customer": form.get("customer"),
                "status": "active"
            })),
        )
    }

    async fn spawn_stub() -> SocketAddr {
        let app = Router::new().route(SUBSCRIPTIONS_PATH, post(stub_subscriptions));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn test_create_subscription_against_stub() {
        let addr = spawn_stub().await;
        let client = StripeClient::new(STUB_KEY.to_string(), &format!("http://{addr}")).unwrap();

        let sub = client
            .create_subscription("cus_1", "price_pro")
            .await
            .unwrap();
        assert_eq!(
            sub,
            ProviderSubscription {
                id: "sub_9".to_string(),
                status: "active".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_create_subscription_surfaces_stripe_message() {
        let addr = spawn_stub().await;
        let client = StripeClient::new(STUB_KEY.to_string(), &format!("http://{addr}")).unwrap();

        let err = client
            .create_subscription("cus_1", "price_bad")
            .await
            .unwrap_err();
        match err {
            PaymentError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "No such price: 'price_bad'");
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_subscription_sends_bearer_key() {
        let addr = spawn_stub().await;
        let client = StripeClient::new("sk_test_wrong".to_string(), &format!("http://{addr}")).unwrap();

        let err = client
            .create_subscription("cus_1", "price_pro")
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::Api { status: 401, .. }));
        assert_eq!(err.provider_message(), "Invalid API Key provided");
    }

    #[test]
    fn test_subscription_form_uses_bracketed_items() {
        let form = subscription_form("cus_123", "price_pro");
        assert_eq!(form[0], ("customer", "cus_123"));
        assert_eq!(form[1], ("items[0][price]", "price_pro"));
    }

    #[test]
    fn test_parse_error_message_from_stripe_body() {
        let body = r#"{"error":{"message":"No such price: 'price_gold'","type":"invalid_request_error"}}"#;
        assert_eq!(parse_error_message(body), "No such price: 'price_gold'");
    }

    #[test]
    fn test_parse_error_message_falls_back_to_type() {
        let body = r#"{"error":{"type":"card_error"}}"#;
        assert_eq!(parse_error_message(body), "card_error");
    }

    #[test]
    fn test_parse_error_message_non_json() {
        assert_eq!(parse_error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(
            parse_error_message("  "),
            "Payment provider request failed"
        );
    }

    #[test]
    fn test_subscriptions_url_strips_trailing_slash() {
        let client = StripeClient::new("sk_test_xxx".to_string(), "https://api.stripe.com/").unwrap();
        assert_eq!(
            client.subscriptions_url(),
            "https://api.stripe.com/v1/subscriptions"
        );
    }

    #[test]
    fn test_provider_subscription_ignores_extra_fields() {
        let body = r#"{"id":"sub_1","object":"subscription","status":"incomplete","items":{}}"#;
        let sub: ProviderSubscription = serde_json::from_str(body).unwrap();
        assert_eq!(sub.id, "sub_1");
        assert_eq!(sub.status, "incomplete");
    }
}
