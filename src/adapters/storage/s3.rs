//! Cloudflare R2 object storage adapter.
//!
//! R2 speaks the S3 API, so this adapter drives the AWS SDK against a
//! custom endpoint. Objects are publicly served from a CDN base URL;
//! presigned URLs grant time-limited direct access.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use secrecy::{ExposeSecret, SecretString};

use crate::ports::{
    generate_object_key, ObjectStorage, PresignedUpload, StorageError, StorageFolder,
    UploadResult, DEFAULT_PRESIGN_EXPIRY_SECS,
};

/// R2 storage configuration.
#[derive(Clone)]
pub struct S3StorageConfig {
    pub account_id: String,
    pub access_key_id: SecretString,
    pub secret_access_key: SecretString,
    pub bucket: String,
    /// CDN base for public object URLs, e.g. `https://media.inkpress.co.il`.
    pub public_base_url: String,
}

impl S3StorageConfig {
    /// Checks that every required field is present.
    pub fn validate(&self) -> Result<(), StorageError> {
        let missing: Vec<&str> = [
            ("account_id", self.account_id.is_empty()),
            ("access_key_id", self.access_key_id.expose_secret().is_empty()),
            (
                "secret_access_key",
                self.secret_access_key.expose_secret().is_empty(),
            ),
            ("bucket", self.bucket.is_empty()),
            ("public_base_url", self.public_base_url.is_empty()),
        ]
        .iter()
        .filter(|(_, empty)| *empty)
        .map(|(name, _)| *name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(StorageError::missing_config(missing.join(", ")))
        }
    }

    fn endpoint_url(&self) -> String {
        format!("https://{}.r2.cloudflarestorage.com", self.account_id)
    }
}

/// Object storage backed by Cloudflare R2.
pub struct S3ObjectStorage {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3ObjectStorage {
    /// Builds the adapter, validating configuration up front.
    pub async fn new(config: S3StorageConfig) -> Result<Self, StorageError> {
        config.validate()?;

        let credentials = aws_sdk_s3::config::Credentials::new(
            config.access_key_id.expose_secret(),
            config.secret_access_key.expose_secret(),
            None,
            None,
            "inkpress-r2",
        );
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new("auto"))
            .endpoint_url(config.endpoint_url())
            .credentials_provider(credentials)
            .load()
            .await;

        Ok(Self {
            client: aws_sdk_s3::Client::new(&sdk_config),
            bucket: config.bucket,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn presigning(expires_in_secs: u64) -> Result<PresigningConfig, StorageError> {
        PresigningConfig::expires_in(Duration::from_secs(expires_in_secs))
            .map_err(StorageError::presign_failed)
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        owner: &str,
        file_name: &str,
        content_type: &str,
        folder: StorageFolder,
    ) -> Result<UploadResult, StorageError> {
        let key = generate_object_key(owner, file_name, folder);
        let size = bytes.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(key = %key, error = %e, "R2 upload failed");
                StorageError::upload_failed(e)
            })?;

        Ok(UploadResult {
            public_url: self.public_url(&key),
            key,
            size,
        })
    }

    async fn presign_upload(
        &self,
        owner: &str,
        file_name: &str,
        content_type: &str,
        folder: StorageFolder,
    ) -> Result<PresignedUpload, StorageError> {
        let key = generate_object_key(owner, file_name, folder);

        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .presigned(Self::presigning(DEFAULT_PRESIGN_EXPIRY_SECS)?)
            .await
            .map_err(|e| {
                tracing::error!(key = %key, error = %e, "R2 upload presign failed");
                StorageError::presign_failed(e)
            })?;

        Ok(PresignedUpload {
            upload_url: presigned.uri().to_string(),
            public_url: self.public_url(&key),
            key,
            expires_in_secs: DEFAULT_PRESIGN_EXPIRY_SECS,
        })
    }

    async fn presign_download(
        &self,
        key: &str,
        expires_in_secs: u64,
    ) -> Result<String, StorageError> {
        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(Self::presigning(expires_in_secs)?)
            .await
            .map_err(|e| {
                tracing::error!(key = %key, error = %e, "R2 download presign failed");
                StorageError::presign_failed(e)
            })?;

        Ok(presigned.uri().to_string())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        // S3 DeleteObject is idempotent: deleting a missing key succeeds
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(key = %key, error = %e, "R2 delete failed");
                StorageError::delete_failed(e)
            })?;

        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }

    fn is_managed_url(&self, url: &str) -> bool {
        url.starts_with(&self.public_base_url) || url.contains(".r2.cloudflarestorage.com")
    }
}
