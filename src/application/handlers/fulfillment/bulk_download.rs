//! BulkDownloadHandler - Command handler for batch print-file downloads.
//!
//! Packages print-ready files for up to 50 orders into one archive with a
//! `manifest.json` ledger, uploads it, and returns a presigned link.

use std::sync::Arc;

use serde_json::json;
use thiserror::Error;

use crate::application::services::{PackageOutcome, PrintFilePackager};
use crate::domain::foundation::{AdminId, DomainError, OrderId, ValidationError};
use crate::domain::fulfillment::{ArchiveManifest, ManifestEntry};
use crate::ports::{
    ArchiveAssembler, ArchiveError, ArchiveFile, AuditEntry, AuditLog, ObjectStorage,
    OrderRepository, StorageError, StorageFolder, DEFAULT_PRESIGN_EXPIRY_SECS,
};

use super::bulk_update_status::MAX_BATCH_SIZE;

/// Command to download print files for a batch of orders.
#[derive(Debug, Clone)]
pub struct BulkDownloadCommand {
    pub admin_id: AdminId,
    pub order_ids: Vec<OrderId>,
}

/// Result of a successful bulk download.
#[derive(Debug, Clone)]
pub struct BulkDownloadResult {
    pub download_url: String,
    pub file_name: String,
    /// Print files in the archive, excluding the manifest.
    pub file_count: usize,
    pub expires_in_secs: u64,
    pub skipped: Vec<OrderId>,
    pub not_found: Vec<OrderId>,
    pub failed: Vec<OrderId>,
}

/// Errors that fail the whole download.
#[derive(Debug, Error)]
pub enum BulkDownloadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Every requested order was skipped, missing, or failed.
    #[error("No valid print files could be generated")]
    NoValidFiles,

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Internal(#[from] DomainError),
}

/// Handler for batch print-file downloads.
pub struct BulkDownloadHandler {
    orders: Arc<dyn OrderRepository>,
    packager: Arc<PrintFilePackager>,
    assembler: Arc<dyn ArchiveAssembler>,
    storage: Arc<dyn ObjectStorage>,
    audit: Arc<dyn AuditLog>,
}

impl BulkDownloadHandler {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        packager: Arc<PrintFilePackager>,
        assembler: Arc<dyn ArchiveAssembler>,
        storage: Arc<dyn ObjectStorage>,
        audit: Arc<dyn AuditLog>,
    ) -> Self {
        Self {
            orders,
            packager,
            assembler,
            storage,
            audit,
        }
    }

    pub async fn handle(
        &self,
        cmd: BulkDownloadCommand,
    ) -> Result<BulkDownloadResult, BulkDownloadError> {
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

        // 2. Load the batch; missing ids become manifest lines, not errors
        let orders = self.orders.find_by_ids(&cmd.order_ids).await?;

        // 3. Package each order, keeping one manifest entry per requested id
        let mut files: Vec<ArchiveFile> = Vec::new();
        let mut entries: Vec<ManifestEntry> = Vec::new();
        let mut skipped = Vec::new();
        let mut not_found = Vec::new();
        let mut failed = Vec::new();

        for id in &cmd.order_ids {
            let order = match orders.iter().find(|o| &o.id == id) {
                Some(order) => order,
                None => {
                    not_found.push(*id);
                    entries.push(ManifestEntry::not_found(*id));
                    continue;
                }
            };

            match self.packager.package(order).await {
                PackageOutcome::Packaged(file) => {
                    entries.push(ManifestEntry::included(*id, &order.order_number));
                    files.push(ArchiveFile::new(file.name, file.bytes));
                }
                PackageOutcome::Skipped { reason } => {
                    skipped.push(*id);
                    entries.push(ManifestEntry::skipped(*id, &order.order_number, reason));
                }
                PackageOutcome::Failed { reason } => {
                    failed.push(*id);
                    entries.push(ManifestEntry::failed(*id, &order.order_number, reason));
                }
            }
        }

        // 4. An archive with nothing in it helps nobody
        let file_count = files.len();
        if file_count == 0 {
            return Err(BulkDownloadError::NoValidFiles);
        }

        // 5. Manifest goes in last
        let manifest = ArchiveManifest::from_entries(cmd.order_ids.len(), entries);
        files.push(ArchiveFile::new(
            "manifest.json",
            manifest.to_json_bytes(),
        ));

        // 6. Assemble, upload, presign
        let archive_bytes = self.assembler.assemble(files)?;
        let archive_name = self.assembler.file_name();
        let uploaded = self
            .storage
            .upload(
                archive_bytes,
                &cmd.admin_id.to_string(),
                &archive_name,
                "application/zip",
                StorageFolder::BulkDownloads,
            )
            .await?;
        let download_url = self
            .storage
            .presign_download(&uploaded.key, DEFAULT_PRESIGN_EXPIRY_SECS)
            .await?;

        // 7. Audit the export
        let entry = AuditEntry::new(
            cmd.admin_id,
            "bulk_print_file_download",
            json!({
                "order_ids": cmd.order_ids,
                "file_count": file_count,
                "skipped": skipped.len(),
                "not_found": not_found.len(),
                "failed": failed.len(),
                "archive_key": uploaded.key,
            }),
        );
        self.audit.append(entry).await?;

        Ok(BulkDownloadResult {
            download_url,
            file_name: archive_name,
            file_count,
            expires_in_secs: DEFAULT_PRESIGN_EXPIRY_SECS,
            skipped,
            not_found,
            failed,
        })
    }
}
