//! Remote file fetcher port.
//!
//! Fetches bytes from a URL (transformed images, generated print files).
//! Deadlines belong to the implementation's HTTP client; the port exposes
//! no timeout knobs.

use async_trait::async_trait;
use thiserror::Error;

/// Error from a remote fetch.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Fetch of {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Fetch of {url} failed: {reason}")]
    Transport { url: String, reason: String },
}

/// Port for fetching remote files.
#[async_trait]
pub trait FileFetcher: Send + Sync {
    /// Downloads the resource at `url` fully into memory.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
