//! Shipment repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OrderId};
use crate::domain::shipment::ShipmentRecord;

/// Port for shipment booking records.
///
/// # Contract
///
/// The store must enforce at most one `created` shipment per order (a
/// partial unique index in the reference schema). `insert` surfaces a
/// violation as `ErrorCode::DuplicateShipment` so the coordinator's
/// read-then-check race loser still gets a conflict, not a raw database
/// error.
#[async_trait]
pub trait ShipmentRepository: Send + Sync {
    /// Persists a new shipment record.
    async fn insert(&self, record: &ShipmentRecord) -> Result<(), DomainError>;

    /// Finds the order's shipment in the `created` state, if any.
    async fn find_active_by_order(
        &self,
        order_id: &OrderId,
    ) -> Result<Option<ShipmentRecord>, DomainError>;
}
