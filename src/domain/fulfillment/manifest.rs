//! Archive manifest for bulk print-file downloads.
//!
//! The manifest is generated per download and written into the archive as
//! `manifest.json`; it is never persisted. It gives operators a ledger of
//! which requested orders made it into the archive and why the rest did
//! not.

use serde::Serialize;

use crate::domain::foundation::{OrderId, Timestamp};

/// Per-order inclusion outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestOutcome {
    Included,
    Skipped,
    Failed,
    NotFound,
}

/// One line of the manifest ledger.
#[derive(Debug, Clone, Serialize)]
pub struct ManifestEntry {
    pub order_id: OrderId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    pub outcome: ManifestOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ManifestEntry {
    pub fn included(order_id: OrderId, order_number: impl Into<String>) -> Self {
        Self {
            order_id,
            order_number: Some(order_number.into()),
            outcome: ManifestOutcome::Included,
            reason: None,
        }
    }

    pub fn skipped(
        order_id: OrderId,
        order_number: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            order_id,
            order_number: Some(order_number.into()),
            outcome: ManifestOutcome::Skipped,
            reason: Some(reason.into()),
        }
    }

    pub fn failed(
        order_id: OrderId,
        order_number: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            order_id,
            order_number: Some(order_number.into()),
            outcome: ManifestOutcome::Failed,
            reason: Some(reason.into()),
        }
    }

    pub fn not_found(order_id: OrderId) -> Self {
        Self {
            order_id,
            order_number: None,
            outcome: ManifestOutcome::NotFound,
            reason: Some("Order not found".to_string()),
        }
    }
}

/// The full manifest written as the archive's last entry.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveManifest {
    pub generated_at: Timestamp,
    /// Number of order ids in the request.
    pub requested: usize,
    pub included: usize,
    pub skipped: usize,
    pub failed: usize,
    pub not_found: usize,
    /// One entry per requested order, in request order.
    pub entries: Vec<ManifestEntry>,
}

impl ArchiveManifest {
    /// Builds a manifest from the collected entries, deriving all counts.
    pub fn from_entries(requested: usize, entries: Vec<ManifestEntry>) -> Self {
        let count = |outcome: ManifestOutcome| {
            entries.iter().filter(|e| e.outcome == outcome).count()
        };

        Self {
            generated_at: Timestamp::now(),
            requested,
            included: count(ManifestOutcome::Included),
            skipped: count(ManifestOutcome::Skipped),
            failed: count(ManifestOutcome::Failed),
            not_found: count(ManifestOutcome::NotFound),
            entries,
        }
    }

    /// Serializes the manifest for inclusion in the archive.
    pub fn to_json_bytes(&self) -> Vec<u8> {
        serde_json::to_vec_pretty(self).unwrap_or_else(|_| b"{}".to_vec())
    }
}
