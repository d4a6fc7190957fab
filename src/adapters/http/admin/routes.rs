//! Axum router for the admin fulfillment endpoints.

use axum::routing::{patch, post};
use axum::Router;

use super::super::state::AdminApiState;
use super::handlers;

/// Create the admin API router.
///
/// # Routes
///
/// - `POST /orders/bulk-status` - Batch status update (strict rate limit)
/// - `POST /orders/bulk-download` - Batch print-file download
/// - `PATCH /orders/:id/status` - Single-order status update
/// - `POST /shipments` - Create a carrier shipment
pub fn admin_router() -> Router<AdminApiState> {
    Router::new()
        .route("/orders/bulk-status", post(handlers::bulk_status))
        .route("/orders/bulk-download", post(handlers::bulk_download))
        .route("/orders/:id/status", patch(handlers::update_status))
        .route("/shipments", post(handlers::create_shipment))
}
