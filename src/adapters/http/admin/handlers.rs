//! Axum handlers for the admin fulfillment endpoints.
//!
//! Each handler runs the same preamble: admin verification, then a
//! rate-limit check keyed by the verified admin, then request validation.
//! Only after both gates pass does any core logic execute.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use crate::application::handlers::fulfillment::{
    BulkDownloadCommand, BulkUpdateStatusCommand, UpdateOrderStatusCommand,
};
use crate::application::handlers::shipping::CreateShipmentCommand;
use crate::domain::foundation::OrderId;
use crate::ports::{AdminIdentity, RateLimitClass, RateLimitDecision};

use super::dto::{
    BulkDownloadRequest, BulkDownloadResponse, BulkStatusRequest, BulkStatusResponse,
    CreateShipmentRequestDto, ShipmentResponse, UpdateStatusRequest, UpdateStatusResponse,
};
use super::super::error::ApiError;
use super::super::state::AdminApiState;

/// Extracts the bearer token, verifies the caller is an admin, and
/// checks the rate limit under the verified admin id.
async fn admin_gate(
    state: &AdminApiState,
    headers: &HeaderMap,
    class: RateLimitClass,
) -> Result<AdminIdentity, ApiError> {
    let token = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or("");

    let identity = state.admin_verifier.verify(token).await?;

    let decision = state
        .rate_limiter
        .check(class, &identity.id.to_string())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Rate limiter backend failed");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        })?;

    if let RateLimitDecision::Limited { retry_after_secs } = decision {
        return Err(ApiError::rate_limited(retry_after_secs));
    }

    Ok(identity)
}

fn parse_order_ids(raw: &[String]) -> Result<Vec<OrderId>, ApiError> {
    raw.iter()
        .map(|s| {
            s.parse::<OrderId>().map_err(|_| {
                ApiError::new(
                    StatusCode::BAD_REQUEST,
                    format!("Invalid order id: {}", s),
                )
            })
        })
        .collect()
}

/// POST /api/admin/orders/bulk-status
pub async fn bulk_status(
    State(state): State<AdminApiState>,
    headers: HeaderMap,
    Json(body): Json<BulkStatusRequest>,
) -> Result<Json<BulkStatusResponse>, ApiError> {
    // Bulk mutations get the strict limit
    let identity = admin_gate(&state, &headers, RateLimitClass::Strict).await?;
    let order_ids = parse_order_ids(&body.order_ids)?;

    let result = state
        .bulk_update_status
        .handle(BulkUpdateStatusCommand {
            admin_id: identity.id,
            order_ids,
            status: body.status,
            note: body.note,
        })
        .await?;

    Ok(Json(result.into()))
}

/// POST /api/admin/orders/bulk-download
pub async fn bulk_download(
    State(state): State<AdminApiState>,
    headers: HeaderMap,
    Json(body): Json<BulkDownloadRequest>,
) -> Result<Json<BulkDownloadResponse>, ApiError> {
    let identity = admin_gate(&state, &headers, RateLimitClass::General).await?;
    let order_ids = parse_order_ids(&body.order_ids)?;

    let result = state
        .bulk_download
        .handle(BulkDownloadCommand {
            admin_id: identity.id,
            order_ids,
        })
        .await?;

    Ok(Json(result.into()))
}

/// PATCH /api/admin/orders/{id}/status
pub async fn update_status(
    State(state): State<AdminApiState>,
    headers: HeaderMap,
    Path(order_id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<UpdateStatusResponse>, ApiError> {
    let identity = admin_gate(&state, &headers, RateLimitClass::General).await?;
    let order_id = order_id.parse::<OrderId>().map_err(|_| {
        ApiError::new(StatusCode::BAD_REQUEST, "Invalid order id")
    })?;

    let result = state
        .update_order_status
        .handle(UpdateOrderStatusCommand {
            admin_id: identity.id,
            order_id,
            status: body.status,
            note: body.note,
        })
        .await?;

    Ok(Json(UpdateStatusResponse {
        order_id: result.order_id.to_string(),
        previous_status: result.previous_status,
        status: result.status,
    }))
}

/// POST /api/admin/shipments
pub async fn create_shipment(
    State(state): State<AdminApiState>,
    headers: HeaderMap,
    Json(body): Json<CreateShipmentRequestDto>,
) -> Result<(StatusCode, Json<ShipmentResponse>), ApiError> {
    let identity = admin_gate(&state, &headers, RateLimitClass::General).await?;
    let order_id = body.order_id.parse::<OrderId>().map_err(|_| {
        ApiError::new(StatusCode::BAD_REQUEST, "Invalid order id")
    })?;

    let result = state
        .create_shipment
        .handle(CreateShipmentCommand {
            admin_id: identity.id,
            order_id,
            carrier: body.carrier,
            service_type: body.service_type,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(result.into())))
}
