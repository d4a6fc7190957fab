//! Order repository port.
//!
//! The checkout flow owns order creation; fulfillment only reads orders
//! and performs narrow updates on status and tracking fields.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OrderId, Timestamp};
use crate::domain::order::{FulfillmentStatus, Order};

/// Port for order persistence.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Loads a single order.
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError>;

    /// Loads every order in `ids` that exists; missing ids are simply
    /// absent from the result, the caller decides how to report them.
    async fn find_by_ids(&self, ids: &[OrderId]) -> Result<Vec<Order>, DomainError>;

    /// Sets the fulfillment status on every listed order in one write.
    async fn update_status_bulk(
        &self,
        ids: &[OrderId],
        status: FulfillmentStatus,
        updated_at: Timestamp,
    ) -> Result<(), DomainError>;

    /// Persists the narrow fulfillment fields of one order (status,
    /// tracking number, carrier, lifecycle timestamps).
    async fn update_fulfillment(&self, order: &Order) -> Result<(), DomainError>;
}
