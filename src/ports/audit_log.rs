//! Audit log port.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::foundation::{AdminId, DomainError, Timestamp};

/// An append-only record of one admin-triggered mutation.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub actor_id: AdminId,
    /// Machine-readable action name, e.g. `bulk_status_update`.
    pub action: String,
    /// Action-specific payload (affected ids, outcome counts).
    pub details: Value,
    pub created_at: Timestamp,
}

impl AuditEntry {
    pub fn new(actor_id: AdminId, action: impl Into<String>, details: Value) -> Self {
        Self {
            actor_id,
            action: action.into(),
            details,
            created_at: Timestamp::now(),
        }
    }
}

/// Port for the append-only audit trail.
///
/// Entries are never updated or deleted.
#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn append(&self, entry: AuditEntry) -> Result<(), DomainError>;
}
