//! Object storage configuration.

use secrecy::SecretString;
use serde::Deserialize;

use super::ConfigValidationError;

/// Which object storage backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Cloudflare R2 (S3-compatible).
    R2,
    /// In-memory, for development and tests.
    Memory,
}

/// Object storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub access_key_id: Option<SecretString>,
    #[serde(default)]
    pub secret_access_key: Option<SecretString>,
    #[serde(default)]
    pub bucket: String,
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

fn default_backend() -> StorageBackend {
    StorageBackend::Memory
}

fn default_public_base_url() -> String {
    "http://localhost:8080/storage".to_string()
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.backend == StorageBackend::R2 {
            if self.account_id.is_empty() {
                return Err(ConfigValidationError::new(
                    "storage.account_id",
                    "required for the r2 backend",
                ));
            }
            if self.access_key_id.is_none() || self.secret_access_key.is_none() {
                return Err(ConfigValidationError::new(
                    "storage.access_key_id",
                    "credentials required for the r2 backend",
                ));
            }
            if self.bucket.is_empty() {
                return Err(ConfigValidationError::new(
                    "storage.bucket",
                    "required for the r2 backend",
                ));
            }
        }
        if self.public_base_url.is_empty() {
            return Err(ConfigValidationError::new(
                "storage.public_base_url",
                "must not be empty",
            ));
        }
        Ok(())
    }
}
