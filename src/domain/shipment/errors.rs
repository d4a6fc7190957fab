//! Shipment error taxonomy.
//!
//! Each precondition of the shipment creation flow fails with a distinct
//! variant so callers can map them to accurate responses (404, 400, 409,
//! 502) without string matching.

use thiserror::Error;

use crate::domain::foundation::{DomainError, OrderId};
use crate::domain::order::AddressFieldError;

use super::CarrierCode;

/// Errors from the shipment creation flow.
#[derive(Debug, Clone, Error)]
pub enum ShipmentError {
    #[error("Order {0} not found")]
    OrderNotFound(OrderId),

    #[error("Order {0} has no shipping address")]
    MissingAddress(OrderId),

    #[error("Shipping address failed validation")]
    InvalidAddress { field_errors: Vec<AddressFieldError> },

    #[error("Order {0} already has an active shipment")]
    Duplicate(OrderId),

    #[error("Carrier {carrier} error [{code}]: {message}")]
    Carrier {
        carrier: CarrierCode,
        code: String,
        message: String,
        retryable: bool,
    },

    #[error(transparent)]
    Internal(#[from] DomainError),
}

impl ShipmentError {
    /// Returns true for carrier failures the caller may retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ShipmentError::Carrier { retryable: true, .. })
    }
}
