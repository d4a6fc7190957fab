//! Order aggregate and line items.
//!
//! Orders are created by the checkout flow; fulfillment only reads them
//! and performs narrow updates (status, tracking fields, timestamps).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OrderId, OrderItemId, Timestamp};
use crate::domain::shipment::CarrierCode;

use super::{FulfillmentStatus, ShippingAddress};

/// A paid customer order moving through fulfillment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Human-readable order number, e.g. `INK-2026-000123`.
    pub order_number: String,
    pub customer_email: Option<String>,
    pub status: FulfillmentStatus,
    /// Order total in agorot.
    pub total_agorot: i64,
    pub shipping_address: Option<ShippingAddress>,
    pub gift: Option<GiftDetails>,
    pub items: Vec<OrderItem>,
    pub tracking_number: Option<String>,
    pub carrier: Option<CarrierCode>,
    pub created_at: Timestamp,
    pub paid_at: Option<Timestamp>,
    pub shipped_at: Option<Timestamp>,
    pub delivered_at: Option<Timestamp>,
    pub cancelled_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

/// A single line item: one artwork at one physical size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    /// Requested print size as entered at checkout; validated during
    /// print-file packaging, not here.
    pub size: String,
    pub paper_type: String,
    pub frame_type: Option<String>,
    pub quantity: u32,
    /// Unit price in agorot.
    pub price_agorot: i64,
    pub original_image_url: Option<String>,
    pub transformed_image_url: Option<String>,
    pub print_ready_url: Option<String>,
}

/// Gift metadata attached at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftDetails {
    pub recipient_name: Option<String>,
    pub message: Option<String>,
}

impl Order {
    /// The item driving production.
    ///
    /// The storefront sells one artwork per order; additional items are
    /// duplicates at other sizes and follow the primary through packaging.
    pub fn primary_item(&self) -> Option<&OrderItem> {
        self.items.first()
    }

    /// Order total in shekels, for carrier declared value.
    pub fn total_ils(&self) -> f64 {
        self.total_agorot as f64 / 100.0
    }

    /// Applies a status change without transition validation.
    ///
    /// Callers must have validated the transition first; terminal statuses
    /// stamp their timestamp here.
    pub fn set_status(&mut self, status: FulfillmentStatus, at: Timestamp) {
        self.status = status;
        self.updated_at = at;
        match status {
            FulfillmentStatus::Delivered => self.delivered_at = Some(at),
            FulfillmentStatus::Cancelled => self.cancelled_at = Some(at),
            _ => {}
        }
    }

    /// Records a successful carrier handoff.
    pub fn mark_shipped(&mut self, tracking_number: String, carrier: CarrierCode, at: Timestamp) {
        self.status = FulfillmentStatus::Shipped;
        self.tracking_number = Some(tracking_number);
        self.carrier = Some(carrier);
        self.shipped_at = Some(at);
        self.updated_at = at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn test_order() -> Order {
        Order {
            id: OrderId::new(),
            order_number: "INK-2026-000123".to_string(),
            customer_email: Some("noa@example.com".to_string()),
            status: FulfillmentStatus::Pending,
            total_agorot: 18900,
            shipping_address: None,
            gift: None,
            items: vec![OrderItem {
                id: OrderItemId::new(),
                size: "A4".to_string(),
                paper_type: "matte".to_string(),
                frame_type: None,
                quantity: 1,
                price_agorot: 18900,
                original_image_url: None,
                transformed_image_url: Some("https://cdn.example.com/t/abc.jpg".to_string()),
                print_ready_url: None,
            }],
            tracking_number: None,
            carrier: None,
            created_at: Timestamp::now(),
            paid_at: Some(Timestamp::now()),
            shipped_at: None,
            delivered_at: None,
            cancelled_at: None,
            updated_at: Timestamp::now(),
        }
    }

    #[test]
    fn total_ils_converts_agorot() {
        assert_eq!(test_order().total_ils(), 189.0);
    }

    #[test]
    fn mark_shipped_sets_tracking_and_timestamp() {
        let mut order = test_order();
        let at = Timestamp::now();

        order.mark_shipped("RR123456789IL".to_string(), CarrierCode::IsraelPost, at);

        assert_eq!(order.status, FulfillmentStatus::Shipped);
        assert_eq!(order.tracking_number.as_deref(), Some("RR123456789IL"));
        assert_eq!(order.shipped_at, Some(at));
    }

    #[test]
    fn set_status_stamps_terminal_timestamps() {
        let mut order = test_order();
        let at = Timestamp::now();

        order.set_status(FulfillmentStatus::Cancelled, at);

        assert_eq!(order.cancelled_at, Some(at));
        assert!(order.delivered_at.is_none());
    }
}
