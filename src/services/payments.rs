// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stripe Checkout client.
//!
//! Handles:
//! - Creating hosted subscription checkout sessions for a plan
//! - Retrieving a session to report whether it was paid
//!
//! Session objects are passed through as raw JSON; the only field this
//! service interprets is `payment_status`.

use crate::error::AppError;
use crate::models::Plan;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const STRIPE_TIMEOUT: Duration = Duration::from_secs(30);

/// Stripe substitutes the real session id into this placeholder on redirect.
const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Stripe API client.
#[derive(Clone)]
pub struct PaymentsClient {
    http: reqwest::Client,
    base_url: String,
    secret_key: Option<String>,
}

impl PaymentsClient {
    pub fn new(base_url: String, secret_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            secret_key,
        }
    }

    fn secret_key(&self) -> Result<&str, AppError> {
        self.secret_key
            .as_deref()
            .ok_or(AppError::NotConfigured("Payment processor"))
    }

    /// Create a monthly subscription checkout session for `plan`.
    ///
    /// Both the success and cancel redirects land on `{origin}/result`, which
    /// reports the outcome from the session itself.
    pub async fn create_checkout_session(
        &self,
        plan: &Plan,
        origin: &str,
    ) -> Result<Value, AppError> {
        let secret_key = self.secret_key()?;
        let return_url = format!(
            "{}/result?session_id={}",
            origin.trim_end_matches('/'),
            SESSION_ID_PLACEHOLDER
        );

        let form = [
            ("mode", "subscription".to_string()),
            ("payment_method_types[]", "card".to_string()),
            ("line_items[0][price_data][currency]", "usd".to_string()),
            (
                "line_items[0][price_data][product_data][name]",
                format!("{} subscription", plan.title),
            ),
            (
                "line_items[0][price_data][unit_amount]",
                plan.monthly_price_cents.to_string(),
            ),
            (
                "line_items[0][price_data][recurring][interval]",
                "month".to_string(),
            ),
            (
                "line_items[0][price_data][recurring][interval_count]",
                "1".to_string(),
            ),
            ("line_items[0][quantity]", "1".to_string()),
            ("success_url", return_url.clone()),
            ("cancel_url", return_url),
        ];

        let response = self
            .http
            .post(format!("{}/v1/checkout/sessions", self.base_url))
            .timeout(STRIPE_TIMEOUT)
            .bearer_auth(secret_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Checkout request failed: {}", e)))?;

        let session = self.check_response_json(response).await?;
        let session_id = session.get("id").and_then(Value::as_str).unwrap_or("");
        tracing::info!(plan = plan.id, session_id, "Created checkout session");
        Ok(session)
    }

    /// Retrieve a checkout session by id.
    pub async fn retrieve_checkout_session(&self, session_id: &str) -> Result<Value, AppError> {
        let secret_key = self.secret_key()?;

        let response = self
            .http
            .get(format!(
                "{}/v1/checkout/sessions/{}",
                self.base_url,
                urlencoding::encode(session_id)
            ))
            .timeout(STRIPE_TIMEOUT)
            .bearer_auth(secret_key)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Checkout request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Parse a Stripe response, lifting `error.message` out of failures.
    async fn check_response_json(&self, response: reqwest::Response) -> Result<Value, AppError> {
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Invalid response from Stripe: {}", e)))?;

        if status.is_success() {
            return Ok(body);
        }

        let message = body
            .pointer("/error/message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Stripe returned HTTP {}", status));
        Err(AppError::Upstream(message))
    }
}

/// Paid/unpaid outcome of a checkout session.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CheckoutOutcome {
    pub session_id: String,
    pub paid: bool,
    pub message: String,
}

impl CheckoutOutcome {
    pub fn from_session(session_id: &str, session: &Value) -> Self {
        let paid = session.get("payment_status").and_then(Value::as_str) == Some("paid");
        let message = if paid {
            "We have received your payment. You will receive an email with the order details shortly."
        } else {
            "Your payment was not successful. Please try again."
        };
        Self {
            session_id: session_id.to_string(),
            paid,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outcome_paid_only_when_status_is_paid() {
        let paid = CheckoutOutcome::from_session("cs_1", &json!({"payment_status": "paid"}));
        assert!(paid.paid);

        for session in [
            json!({"payment_status": "unpaid"}),
            json!({"payment_status": "no_payment_required"}),
            json!({}),
        ] {
            assert!(!CheckoutOutcome::from_session("cs_1", &session).paid);
        }
    }

    #[tokio::test]
    async fn test_missing_secret_key_is_not_configured() {
        let client = PaymentsClient::new("http://127.0.0.1:1".into(), None);
        let err = client.retrieve_checkout_session("cs_1").await.unwrap_err();
        assert!(matches!(err, AppError::NotConfigured(_)));
    }
}
