//! BulkUpdateStatusHandler - Command handler for batch status transitions.

use std::sync::Arc;

use serde_json::json;
use thiserror::Error;

use crate::domain::foundation::{AdminId, DomainError, OrderId, Timestamp, ValidationError};
use crate::domain::order::{validate_batch, FulfillmentStatus, InvalidTransition};
use crate::ports::{AuditEntry, AuditLog, FulfillmentNotifier, OrderRepository};

/// Orders per batch, both modes.
pub const MAX_BATCH_SIZE: usize = 50;

/// Command to move a batch of orders to a new fulfillment status.
#[derive(Debug, Clone)]
pub struct BulkUpdateStatusCommand {
    pub admin_id: AdminId,
    pub order_ids: Vec<OrderId>,
    pub status: FulfillmentStatus,
    pub note: Option<String>,
}

/// Result of a batch status update.
///
/// Partial failure is the normal case: invalid transitions and unknown ids
/// are reported per item while the rest of the batch proceeds.
#[derive(Debug, Clone)]
pub struct BulkUpdateStatusResult {
    pub updated: usize,
    pub invalid: Vec<InvalidTransition>,
    pub not_found: Vec<OrderId>,
}

/// Errors that fail the whole batch.
#[derive(Debug, Error)]
pub enum BulkUpdateStatusError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Internal(#[from] DomainError),
}

/// Handler for batch status transitions.
pub struct BulkUpdateStatusHandler {
    orders: Arc<dyn OrderRepository>,
    audit: Arc<dyn AuditLog>,
    notifier: Arc<dyn FulfillmentNotifier>,
}

impl BulkUpdateStatusHandler {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        audit: Arc<dyn AuditLog>,
        notifier: Arc<dyn FulfillmentNotifier>,
    ) -> Self {
        Self {
            orders,
            audit,
            notifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: BulkUpdateStatusCommand,
    ) -> Result<BulkUpdateStatusResult, BulkUpdateStatusError> {
        // 1. Bound the batch
        if cmd.order_ids.is_empty() || cmd.order_ids.len() > MAX_BATCH_SIZE {
            return Err(ValidationError::out_of_range(
                "order_ids",
                1,
                MAX_BATCH_SIZE,
                cmd.order_ids.len(),
            )
            .into());
        }

        // 2. Load what exists; the rest is reported, not fatal
        let orders = self.orders.find_by_ids(&cmd.order_ids).await?;
        let not_found: Vec<OrderId> = cmd
            .order_ids
            .iter()
            .filter(|id| !orders.iter().any(|o| &o.id == *id))
            .copied()
            .collect();

        // 3. Partition by transition validity
        let items: Vec<(OrderId, FulfillmentStatus)> =
            orders.iter().map(|o| (o.id, o.status)).collect();
        let partition = validate_batch(&items, cmd.status);

        // 4. Persist the valid slice in one write
        let now = Timestamp::now();
        if !partition.valid.is_empty() {
            self.orders
                .update_status_bulk(&partition.valid, cmd.status, now)
                .await?;

            // 5. Audit the mutation
            let entry = AuditEntry::new(
                cmd.admin_id,
                "bulk_status_update",
                json!({
                    "order_ids": partition.valid,
                    "new_status": cmd.status,
                    "total_affected": partition.valid.len(),
                    "note": cmd.note,
                }),
            );
            self.audit.append(entry).await?;

            // 6. Notify customers, fire-and-forget
            for order in orders.iter().filter(|o| partition.valid.contains(&o.id)) {
                self.notifier.order_status_changed(order, cmd.status).await;
            }
        }

        Ok(BulkUpdateStatusResult {
            updated: partition.valid.len(),
            invalid: partition.invalid,
            not_found,
        })
    }
}
