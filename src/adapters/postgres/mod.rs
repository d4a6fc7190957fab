//! PostgreSQL record store adapters.

mod audit_log;
mod order_repository;
mod shipment_repository;

pub use audit_log::PgAuditLog;
pub use order_repository::PgOrderRepository;
pub use shipment_repository::PgShipmentRepository;
