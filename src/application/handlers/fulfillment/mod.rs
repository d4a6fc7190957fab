//! Fulfillment handlers.
//!
//! ## Commands
//! - Bulk status update across up to 50 orders
//! - Bulk print-file download (archive + presigned link)
//! - Single-order status update

mod bulk_download;
mod bulk_update_status;
mod update_order_status;

pub use bulk_download::{
    BulkDownloadCommand, BulkDownloadError, BulkDownloadHandler, BulkDownloadResult,
};
pub use bulk_update_status::{
    BulkUpdateStatusCommand, BulkUpdateStatusError, BulkUpdateStatusHandler,
    BulkUpdateStatusResult,
};
pub use update_order_status::{
    UpdateOrderStatusCommand, UpdateOrderStatusError, UpdateOrderStatusHandler,
    UpdateOrderStatusResult,
};
