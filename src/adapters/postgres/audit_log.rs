//! PostgreSQL implementation of AuditLog.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{AuditEntryId, DomainError, ErrorCode};
use crate::ports::{AuditEntry, AuditLog};

/// PostgreSQL implementation of the AuditLog port.
///
/// The table is insert-only; nothing in the application updates or deletes
/// rows.
pub struct PgAuditLog {
    pool: PgPool,
}

impl PgAuditLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLog for PgAuditLog {
    async fn append(&self, entry: AuditEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO admin_audit_log (id, actor_id, action, details, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(AuditEntryId::new().as_uuid())
        .bind(entry.actor_id.as_uuid())
        .bind(&entry.action)
        .bind(&entry.details)
        .bind(entry.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to append audit entry: {}", e),
            )
        })?;

        Ok(())
    }
}
