//! Object storage port.
//!
//! Uniform upload/presign/delete contract over swappable storage backends.
//! Callers never see backend-specific errors; every failure carries one of
//! the five `StorageErrorCode`s plus its cause.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::foundation::Timestamp;

/// Default expiry for presigned URLs (1 hour).
pub const DEFAULT_PRESIGN_EXPIRY_SECS: u64 = 3600;

/// Closed set of folders objects may live under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageFolder {
    Uploads,
    Transformed,
    PrintReady,
    Thumbnails,
    BulkDownloads,
}

impl StorageFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageFolder::Uploads => "uploads",
            StorageFolder::Transformed => "transformed",
            StorageFolder::PrintReady => "print-ready",
            StorageFolder::Thumbnails => "thumbnails",
            StorageFolder::BulkDownloads => "bulk-downloads",
        }
    }
}

impl fmt::Display for StorageFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Generates a unique storage key.
///
/// Format: `{folder}/{owner}/{unix_millis}-{uuid}.{ext}`. Keys sort by
/// time, are namespaced by owner, and are never reused. The extension is the
/// lowercased suffix of `file_name`, defaulting to `jpg` when absent.
pub fn generate_object_key(owner: &str, file_name: &str, folder: StorageFolder) -> String {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| "jpg".to_string());

    format!(
        "{}/{}/{}-{}.{}",
        folder,
        owner,
        Timestamp::now().as_unix_millis(),
        Uuid::new_v4(),
        ext
    )
}

/// Result of a direct upload.
#[derive(Debug, Clone)]
pub struct UploadResult {
    pub key: String,
    pub public_url: String,
    /// Byte length actually written.
    pub size: usize,
}

/// Result of presigned upload URL generation.
#[derive(Debug, Clone)]
pub struct PresignedUpload {
    pub upload_url: String,
    pub key: String,
    pub public_url: String,
    pub expires_in_secs: u64,
}

/// Error codes for storage operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorCode {
    UploadFailed,
    DownloadFailed,
    DeleteFailed,
    PresignFailed,
    MissingConfig,
}

impl fmt::Display for StorageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StorageErrorCode::UploadFailed => "UPLOAD_FAILED",
            StorageErrorCode::DownloadFailed => "DOWNLOAD_FAILED",
            StorageErrorCode::DeleteFailed => "DELETE_FAILED",
            StorageErrorCode::PresignFailed => "PRESIGN_FAILED",
            StorageErrorCode::MissingConfig => "MISSING_CONFIG",
        };
        write!(f, "{}", s)
    }
}

/// Typed storage error carrying its code and underlying cause.
#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct StorageError {
    pub code: StorageErrorCode,
    pub message: String,
}

impl StorageError {
    pub fn new(code: StorageErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn upload_failed(cause: impl fmt::Display) -> Self {
        Self::new(
            StorageErrorCode::UploadFailed,
            format!("Failed to upload object: {}", cause),
        )
    }

    pub fn download_failed(cause: impl fmt::Display) -> Self {
        Self::new(
            StorageErrorCode::DownloadFailed,
            format!("Failed to download object: {}", cause),
        )
    }

    pub fn delete_failed(cause: impl fmt::Display) -> Self {
        Self::new(
            StorageErrorCode::DeleteFailed,
            format!("Failed to delete object: {}", cause),
        )
    }

    pub fn presign_failed(cause: impl fmt::Display) -> Self {
        Self::new(
            StorageErrorCode::PresignFailed,
            format!("Failed to presign URL: {}", cause),
        )
    }

    pub fn missing_config(detail: impl fmt::Display) -> Self {
        Self::new(
            StorageErrorCode::MissingConfig,
            format!("Storage configuration incomplete: {}", detail),
        )
    }
}

/// Port for object storage backends.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Uploads bytes under a freshly generated key, returning the key,
    /// public URL, and byte length written.
    async fn upload(
        &self,
        bytes: Vec<u8>,
        owner: &str,
        file_name: &str,
        content_type: &str,
        folder: StorageFolder,
    ) -> Result<UploadResult, StorageError>;

    /// Generates a presigned upload URL for direct client upload.
    async fn presign_upload(
        &self,
        owner: &str,
        file_name: &str,
        content_type: &str,
        folder: StorageFolder,
    ) -> Result<PresignedUpload, StorageError>;

    /// Generates a time-limited download URL for an existing object.
    async fn presign_download(
        &self,
        key: &str,
        expires_in_secs: u64,
    ) -> Result<String, StorageError>;

    /// Deletes an object. Deleting a non-existent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Public URL of an object by key.
    fn public_url(&self, key: &str) -> String;

    /// Whether `url` was issued by this gateway.
    fn is_managed_url(&self, url: &str) -> bool;
}
