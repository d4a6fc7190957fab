//! Shipping carrier port.
//!
//! Defines the contract for carrier integrations (Israel Post, couriers).
//! Implementations create shipments and return tracking identifiers;
//! failures are mapped to `CarrierError` with a retryability hint, never
//! surfaced as raw transport errors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::OrderId;
use crate::domain::shipment::{CarrierCode, ServiceType};

/// A party in a shipment: sender or recipient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentParty {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub street: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Package dimensions and weight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PackageDimensions {
    /// Centimeters.
    pub length_cm: u32,
    pub width_cm: u32,
    pub height_cm: u32,
    /// Grams.
    pub weight_g: u32,
}

/// Request to book a shipment with a carrier.
#[derive(Debug, Clone, Serialize)]
pub struct CreateShipmentRequest {
    pub order_id: OrderId,
    pub order_number: String,
    pub sender: ShipmentParty,
    pub recipient: ShipmentParty,
    pub package: PackageDimensions,
    pub service_type: ServiceType,
    /// Declared value in shekels.
    pub declared_value: f64,
    pub description: String,
    /// Carrier-side reference; defaults to the order number.
    pub reference: String,
}

/// Result of a successful carrier booking.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateShipmentResult {
    /// Carrier-assigned shipment identifier.
    pub shipment_id: String,
    pub tracking_number: String,
    pub carrier: CarrierCode,
    pub label_url: Option<String>,
}

/// Error from a carrier integration.
#[derive(Debug, Clone, Error)]
#[error("Carrier {carrier} error [{code}]: {message}")]
pub struct CarrierError {
    pub carrier: CarrierCode,
    /// Carrier-specific error code, e.g. `NOT_CONFIGURED`, `API_ERROR`.
    pub code: String,
    pub message: String,
    /// True when the origin indicates a transient condition. The core
    /// performs no automatic retries; this is a hint for callers.
    pub retryable: bool,
}

impl CarrierError {
    pub fn new(
        carrier: CarrierCode,
        code: impl Into<String>,
        message: impl Into<String>,
        retryable: bool,
    ) -> Self {
        Self {
            carrier,
            code: code.into(),
            message: message.into(),
            retryable,
        }
    }

    pub fn not_configured(carrier: CarrierCode) -> Self {
        Self::new(
            carrier,
            "NOT_CONFIGURED",
            format!("Carrier {} is not configured", carrier),
            false,
        )
    }

    pub fn not_registered(carrier: CarrierCode) -> Self {
        Self::new(
            carrier,
            "PROVIDER_NOT_FOUND",
            format!("Carrier {} is not registered", carrier),
            false,
        )
    }
}

/// Port for shipping carrier clients.
#[async_trait]
pub trait CarrierClient: Send + Sync {
    /// The carrier this client talks to.
    fn carrier(&self) -> CarrierCode;

    /// Whether the client has the credentials it needs.
    fn is_configured(&self) -> bool;

    /// Books a shipment and returns carrier identifiers.
    async fn create_shipment(
        &self,
        request: CreateShipmentRequest,
    ) -> Result<CreateShipmentResult, CarrierError>;
}
