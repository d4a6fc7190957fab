//! Fulfillment notification port.
//!
//! Notifications are fire-and-forget: they run after state changes are
//! persisted, and a delivery failure must never fail the operation that
//! triggered it. Implementations log failures and return normally.

use async_trait::async_trait;

use crate::domain::order::{FulfillmentStatus, Order};

/// Port for customer-facing fulfillment notifications.
#[async_trait]
pub trait FulfillmentNotifier: Send + Sync {
    /// The order's fulfillment status changed.
    async fn order_status_changed(&self, order: &Order, new_status: FulfillmentStatus);

    /// The order was handed to a carrier.
    async fn order_shipped(&self, order: &Order, tracking_number: &str);
}
