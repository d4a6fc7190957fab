//! Resend email notifier.
//!
//! Sends fulfillment emails through the Resend HTTP API. Notifications run
//! after the triggering mutation is already persisted, so failures here are
//! logged and swallowed; they must never fail the operation.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use crate::domain::order::{FulfillmentStatus, Order};
use crate::ports::FulfillmentNotifier;

const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Resend-backed fulfillment notifier.
pub struct ResendNotifier {
    api_key: SecretString,
    from_address: String,
    http_client: reqwest::Client,
}

impl ResendNotifier {
    pub fn new(api_key: impl Into<String>, from_address: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            from_address: from_address.into(),
            http_client: reqwest::Client::new(),
        }
    }

    async fn send(&self, order: &Order, subject: String, body: String) {
        let to = match order.customer_email.as_deref() {
            Some(email) => email,
            None => {
                tracing::debug!(order_id = %order.id, "Order has no customer email, skipping");
                return;
            }
        };

        let payload = json!({
            "from": self.from_address,
            "to": [to],
            "subject": subject,
            "text": body,
            "headers": { "X-Order-Number": order.order_number },
        });

        let result = self
            .http_client
            .post(RESEND_API_URL)
            .bearer_auth(self.api_key.expose_secret())
            .json(&payload)
            .send()
            .await;

        match result {
            Ok(response) if !response.status().is_success() => {
                tracing::warn!(
                    order_id = %order.id,
                    status = response.status().as_u16(),
                    "Notification email rejected"
                );
            }
            Err(e) => {
                tracing::warn!(order_id = %order.id, error = %e, "Notification email failed");
            }
            Ok(_) => {}
        }
    }
}

#[async_trait]
impl FulfillmentNotifier for ResendNotifier {
    async fn order_status_changed(&self, order: &Order, new_status: FulfillmentStatus) {
        self.send(
            order,
            format!("עדכון הזמנה {}", order.order_number),
            format!(
                "ההזמנה שלך {} עברה לסטטוס: {}",
                order.order_number,
                new_status.display_label()
            ),
        )
        .await;
    }

    async fn order_shipped(&self, order: &Order, tracking_number: &str) {
        self.send(
            order,
            format!("ההזמנה {} נשלחה", order.order_number),
            format!(
                "ההזמנה שלך {} נשלחה. מספר מעקב: {}",
                order.order_number, tracking_number
            ),
        )
        .await;
    }
}

/// Notifier that does nothing; for environments without email credentials.
pub struct NoopNotifier;

#[async_trait]
impl FulfillmentNotifier for NoopNotifier {
    async fn order_status_changed(&self, order: &Order, new_status: FulfillmentStatus) {
        tracing::debug!(
            order_id = %order.id,
            status = %new_status,
            "Notification suppressed (no email configured)"
        );
    }

    async fn order_shipped(&self, order: &Order, tracking_number: &str) {
        tracing::debug!(
            order_id = %order.id,
            tracking_number,
            "Notification suppressed (no email configured)"
        );
    }
}
