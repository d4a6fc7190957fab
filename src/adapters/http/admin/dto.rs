//! HTTP DTOs for the admin fulfillment endpoints.
//!
//! These types define the JSON request/response structure and are the
//! boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::application::handlers::fulfillment::{BulkDownloadResult, BulkUpdateStatusResult};
use crate::application::handlers::shipping::ShipmentCreated;
use crate::domain::order::FulfillmentStatus;
use crate::domain::shipment::{CarrierCode, ServiceType};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to bulk-update fulfillment status.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkStatusRequest {
    pub order_ids: Vec<String>,
    pub status: FulfillmentStatus,
    #[serde(default)]
    pub note: Option<String>,
}

/// Request to download print files for a batch of orders.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkDownloadRequest {
    pub order_ids: Vec<String>,
}

/// Request to update one order's status.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: FulfillmentStatus,
    #[serde(default)]
    pub note: Option<String>,
}

/// Request to create a shipment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateShipmentRequestDto {
    pub order_id: String,
    #[serde(default)]
    pub carrier: Option<CarrierCode>,
    #[serde(default)]
    pub service_type: Option<ServiceType>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Per-order rejection in a bulk status update.
#[derive(Debug, Clone, Serialize)]
pub struct InvalidOrderResponse {
    pub order_id: String,
    pub reason: String,
}

/// Response for a bulk status update.
#[derive(Debug, Clone, Serialize)]
pub struct BulkStatusResponse {
    pub updated: usize,
    pub invalid: Vec<InvalidOrderResponse>,
    pub not_found: Vec<String>,
}

impl From<BulkUpdateStatusResult> for BulkStatusResponse {
    fn from(result: BulkUpdateStatusResult) -> Self {
        Self {
            updated: result.updated,
            invalid: result
                .invalid
                .into_iter()
                .map(|i| InvalidOrderResponse {
                    order_id: i.order_id.to_string(),
                    reason: i.reason,
                })
                .collect(),
            not_found: result.not_found.iter().map(|id| id.to_string()).collect(),
        }
    }
}

/// Response for a bulk print-file download.
#[derive(Debug, Clone, Serialize)]
pub struct BulkDownloadResponse {
    pub download_url: String,
    pub file_name: String,
    pub file_count: usize,
    pub expires_in: u64,
    pub skipped: Vec<String>,
    pub not_found: Vec<String>,
    pub failed: Vec<String>,
}

impl From<BulkDownloadResult> for BulkDownloadResponse {
    fn from(result: BulkDownloadResult) -> Self {
        Self {
            download_url: result.download_url,
            file_name: result.file_name,
            file_count: result.file_count,
            expires_in: result.expires_in_secs,
            skipped: result.skipped.iter().map(|id| id.to_string()).collect(),
            not_found: result.not_found.iter().map(|id| id.to_string()).collect(),
            failed: result.failed.iter().map(|id| id.to_string()).collect(),
        }
    }
}

/// Response for a single-order status update.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateStatusResponse {
    pub order_id: String,
    pub previous_status: FulfillmentStatus,
    pub status: FulfillmentStatus,
}

/// Response for shipment creation.
#[derive(Debug, Clone, Serialize)]
pub struct ShipmentResponse {
    pub shipment_id: String,
    pub tracking_number: String,
    pub carrier: CarrierCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_url: Option<String>,
}

impl From<ShipmentCreated> for ShipmentResponse {
    fn from(result: ShipmentCreated) -> Self {
        Self {
            shipment_id: result.shipment_id,
            tracking_number: result.tracking_number,
            carrier: result.carrier,
            label_url: result.label_url,
        }
    }
}
