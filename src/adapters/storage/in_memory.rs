//! In-memory object storage for testing and development.
//!
//! Stores objects in a HashMap and issues deterministic pseudo-presigned
//! URLs. Not suitable for production.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::ports::{
    generate_object_key, ObjectStorage, PresignedUpload, StorageError, StorageFolder,
    UploadResult, DEFAULT_PRESIGN_EXPIRY_SECS,
};

/// A stored object.
#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    #[allow(dead_code)]
    content_type: String,
}

/// In-memory object storage backend.
pub struct InMemoryObjectStorage {
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
    public_base_url: String,
}

impl InMemoryObjectStorage {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            objects: Arc::new(RwLock::new(HashMap::new())),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Returns a stored object's bytes, for test assertions.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.read().await.get(key).map(|o| o.bytes.clone())
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
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

        self.objects.write().await.insert(
            key.clone(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );

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

        // Reserve the key so a later upload-by-URL has somewhere to land
        self.objects.write().await.insert(
            key.clone(),
            StoredObject {
                bytes: Vec::new(),
                content_type: content_type.to_string(),
            },
        );

        Ok(PresignedUpload {
            upload_url: format!(
                "{}/{}?signature=dev&expires={}",
                self.public_base_url,
                key,
                Timestamp::now().plus_secs(DEFAULT_PRESIGN_EXPIRY_SECS as i64).as_unix_secs()
            ),
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
        if !self.objects.read().await.contains_key(key) {
            return Err(StorageError::presign_failed(format!(
                "no such object: {}",
                key
            )));
        }

        Ok(format!(
            "{}/{}?signature=dev&expires={}",
            self.public_base_url,
            key,
            Timestamp::now().plus_secs(expires_in_secs as i64).as_unix_secs()
        ))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        // Removing a missing key is fine
        self.objects.write().await.remove(key);
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }

    fn is_managed_url(&self, url: &str) -> bool {
        url.starts_with(&self.public_base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> InMemoryObjectStorage {
        InMemoryObjectStorage::new("https://storage.test")
    }

    #[tokio::test]
    async fn upload_stores_bytes_and_reports_size() {
        let s = storage();

        let result = s
            .upload(
                b"hello".to_vec(),
                "admin-1",
                "archive.zip",
                "application/zip",
                StorageFolder::BulkDownloads,
            )
            .await
            .unwrap();

        assert_eq!(result.size, 5);
        assert!(result.key.starts_with("bulk-downloads/admin-1/"));
        assert_eq!(s.get(&result.key).await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn key_roundtrips_through_public_url() {
        let s = storage();
        let key = generate_object_key("u", "f.jpg", StorageFolder::Uploads);

        assert!(s.is_managed_url(&s.public_url(&key)));
        assert!(!s.is_managed_url("https://other.example/f.jpg"));
    }

    #[tokio::test]
    async fn presign_download_requires_existing_object() {
        let s = storage();
        assert!(s.presign_download("missing/key.zip", 60).await.is_err());

        let uploaded = s
            .upload(
                b"x".to_vec(),
                "u",
                "f.jpg",
                "image/jpeg",
                StorageFolder::Uploads,
            )
            .await
            .unwrap();
        let url = s.presign_download(&uploaded.key, 60).await.unwrap();
        assert!(url.contains("signature=dev"));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let s = storage();
        assert!(s.delete("never/existed.jpg").await.is_ok());

        let uploaded = s
            .upload(
                b"x".to_vec(),
                "u",
                "f.jpg",
                "image/jpeg",
                StorageFolder::Uploads,
            )
            .await
            .unwrap();
        assert!(s.delete(&uploaded.key).await.is_ok());
        assert!(s.get(&uploaded.key).await.is_none());
        assert!(s.delete(&uploaded.key).await.is_ok());
    }

    #[tokio::test]
    async fn presign_upload_reserves_key() {
        let s = storage();
        let presigned = s
            .presign_upload("u", "photo.png", "image/png", StorageFolder::Uploads)
            .await
            .unwrap();

        assert_eq!(presigned.expires_in_secs, 3600);
        assert!(presigned.key.ends_with(".png"));
        assert_eq!(s.len().await, 1);
    }
}
