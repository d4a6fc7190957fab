//! HTTP error mapping.
//!
//! Maps application and domain errors to status codes and a uniform JSON
//! error body. Internal details are logged, not leaked.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::application::handlers::fulfillment::{BulkDownloadError, BulkUpdateStatusError, UpdateOrderStatusError};
use crate::domain::shipment::ShipmentError;
use crate::ports::AuthError;

/// A JSON API error with an HTTP status.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, "Too many requests")
            .with_details(json!({ "retry_after_secs": retry_after_secs }))
    }

    fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.message,
            "details": self.details,
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingToken => {
                ApiError::new(StatusCode::UNAUTHORIZED, "Unauthorized - Please sign in")
            }
            AuthError::InvalidToken(_) => {
                ApiError::new(StatusCode::UNAUTHORIZED, "Unauthorized - Please sign in")
            }
            AuthError::Forbidden => ApiError::new(StatusCode::FORBIDDEN, "Admin access required"),
        }
    }
}

impl From<BulkUpdateStatusError> for ApiError {
    fn from(e: BulkUpdateStatusError) -> Self {
        match e {
            BulkUpdateStatusError::Validation(v) => {
                ApiError::new(StatusCode::BAD_REQUEST, v.to_string())
            }
            BulkUpdateStatusError::Internal(err) => {
                tracing::error!(error = %err, "Bulk status update failed");
                ApiError::internal()
            }
        }
    }
}

impl From<BulkDownloadError> for ApiError {
    fn from(e: BulkDownloadError) -> Self {
        match e {
            BulkDownloadError::Validation(v) => {
                ApiError::new(StatusCode::BAD_REQUEST, v.to_string())
            }
            BulkDownloadError::NoValidFiles => ApiError::new(
                StatusCode::BAD_REQUEST,
                "No valid print files could be generated",
            ),
            BulkDownloadError::Archive(err) => {
                tracing::error!(error = %err, "Archive assembly failed");
                ApiError::internal()
            }
            BulkDownloadError::Storage(err) => {
                tracing::error!(error = %err, "Archive upload failed");
                ApiError::internal()
            }
            BulkDownloadError::Internal(err) => {
                tracing::error!(error = %err, "Bulk download failed");
                ApiError::internal()
            }
        }
    }
}

impl From<UpdateOrderStatusError> for ApiError {
    fn from(e: UpdateOrderStatusError) -> Self {
        match e {
            UpdateOrderStatusError::NotFound(_) => {
                ApiError::new(StatusCode::NOT_FOUND, "Order not found")
            }
            UpdateOrderStatusError::InvalidTransition { .. } => {
                ApiError::new(StatusCode::BAD_REQUEST, e.to_string())
            }
            UpdateOrderStatusError::Internal(err) => {
                tracing::error!(error = %err, "Order status update failed");
                ApiError::internal()
            }
        }
    }
}

impl From<ShipmentError> for ApiError {
    fn from(e: ShipmentError) -> Self {
        match &e {
            ShipmentError::OrderNotFound(_) => {
                ApiError::new(StatusCode::NOT_FOUND, "Order not found")
            }
            ShipmentError::MissingAddress(_) => {
                ApiError::new(StatusCode::BAD_REQUEST, "Order has no shipping address")
            }
            ShipmentError::InvalidAddress { field_errors } => ApiError::new(
                StatusCode::BAD_REQUEST,
                "Shipping address failed validation",
            )
            .with_details(json!({ "fields": field_errors })),
            ShipmentError::Duplicate(_) => ApiError::new(
                StatusCode::CONFLICT,
                "Order already has an active shipment",
            ),
            ShipmentError::Carrier {
                code, retryable, ..
            } => {
                tracing::error!(error = %e, "Carrier booking failed");
                ApiError::new(StatusCode::BAD_GATEWAY, "Carrier request failed")
                    .with_details(json!({ "code": code, "retryable": retryable }))
            }
            ShipmentError::Internal(err) => {
                tracing::error!(error = %err, "Shipment creation failed");
                ApiError::internal()
            }
        }
    }
}
