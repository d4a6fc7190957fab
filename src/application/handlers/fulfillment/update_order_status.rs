//! UpdateOrderStatusHandler - Command handler for single-order transitions.

use std::sync::Arc;

use serde_json::json;
use thiserror::Error;

use crate::domain::foundation::{AdminId, DomainError, OrderId, StateMachine, Timestamp};
use crate::domain::order::FulfillmentStatus;
use crate::ports::{AuditEntry, AuditLog, FulfillmentNotifier, OrderRepository};

/// Command to move one order to a new fulfillment status.
#[derive(Debug, Clone)]
pub struct UpdateOrderStatusCommand {
    pub admin_id: AdminId,
    pub order_id: OrderId,
    pub status: FulfillmentStatus,
    pub note: Option<String>,
}

/// Result of a successful single-order transition.
#[derive(Debug, Clone)]
pub struct UpdateOrderStatusResult {
    pub order_id: OrderId,
    pub previous_status: FulfillmentStatus,
    pub status: FulfillmentStatus,
}

/// Errors from a single-order transition.
#[derive(Debug, Error)]
pub enum UpdateOrderStatusError {
    #[error("Order {0} not found")]
    NotFound(OrderId),

    #[error("Cannot change status from '{from}' to '{to}'")]
    InvalidTransition {
        from: FulfillmentStatus,
        to: FulfillmentStatus,
    },

    #[error(transparent)]
    Internal(#[from] DomainError),
}

/// Handler for single-order status updates.
pub struct UpdateOrderStatusHandler {
    orders: Arc<dyn OrderRepository>,
    audit: Arc<dyn AuditLog>,
    notifier: Arc<dyn FulfillmentNotifier>,
}

impl UpdateOrderStatusHandler {
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
        cmd: UpdateOrderStatusCommand,
    ) -> Result<UpdateOrderStatusResult, UpdateOrderStatusError> {
        // 1. Load the order
        let mut order = self
            .orders
            .find_by_id(&cmd.order_id)
            .await?
            .ok_or(UpdateOrderStatusError::NotFound(cmd.order_id))?;

        // 2. Validate the transition
        let previous = order.status;
        if !previous.can_transition_to(&cmd.status) {
            return Err(UpdateOrderStatusError::InvalidTransition {
                from: previous,
                to: cmd.status,
            });
        }

        // 3. Persist (terminal statuses stamp their timestamp)
        order.set_status(cmd.status, Timestamp::now());
        self.orders.update_fulfillment(&order).await?;

        // 4. Audit
        let entry = AuditEntry::new(
            cmd.admin_id,
            "order_status_update",
            json!({
                "order_id": cmd.order_id,
                "from": previous,
                "to": cmd.status,
                "note": cmd.note,
            }),
        );
        self.audit.append(entry).await?;

        // 5. Notify, fire-and-forget
        self.notifier.order_status_changed(&order, cmd.status).await;

        Ok(UpdateOrderStatusResult {
            order_id: cmd.order_id,
            previous_status: previous,
            status: cmd.status,
        })
    }
}
