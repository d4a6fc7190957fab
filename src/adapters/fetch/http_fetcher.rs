//! HTTP file fetcher.
//!
//! The deadline lives in the client: a request either completes within the
//! configured timeout or fails with a transport error. Callers get no
//! timeout knobs and race no timers.

use std::time::Duration;

use async_trait::async_trait;

use crate::ports::{FetchError, FileFetcher};

/// Default per-request deadline.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches remote files over HTTP with a fixed deadline.
pub struct HttpFileFetcher {
    client: reqwest::Client,
}

impl HttpFileFetcher {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("reqwest client construction cannot fail with static options"),
        }
    }
}

impl Default for HttpFileFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileFetcher for HttpFileFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(bytes.to_vec())
    }
}
