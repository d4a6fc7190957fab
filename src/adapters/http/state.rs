//! Shared state for the admin API.

use std::sync::Arc;

use crate::application::handlers::fulfillment::{
    BulkDownloadHandler, BulkUpdateStatusHandler, UpdateOrderStatusHandler,
};
use crate::application::handlers::shipping::CreateShipmentHandler;
use crate::ports::{AdminVerifier, RateLimiter};

/// Handlers and gates wired together for the admin API.
#[derive(Clone)]
pub struct AdminApiState {
    pub bulk_update_status: Arc<BulkUpdateStatusHandler>,
    pub bulk_download: Arc<BulkDownloadHandler>,
    pub update_order_status: Arc<UpdateOrderStatusHandler>,
    pub create_shipment: Arc<CreateShipmentHandler>,
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub admin_verifier: Arc<dyn AdminVerifier>,
}
