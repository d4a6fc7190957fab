//! Redis configuration (rate limiter backend).

use serde::Deserialize;

/// Redis connection configuration.
///
/// Optional: when no URL is configured the in-memory rate limiter is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedisConfig {
    #[serde(default)]
    pub url: Option<String>,
}

impl RedisConfig {
    pub fn is_configured(&self) -> bool {
        self.url.as_deref().map(|u| !u.is_empty()).unwrap_or(false)
    }
}
