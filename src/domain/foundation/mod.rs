//! Shared domain primitives.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AdminId, AuditEntryId, OrderId, OrderItemId, ShipmentId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
