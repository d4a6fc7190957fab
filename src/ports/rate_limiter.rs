//! Rate limiter port.
//!
//! A pass/fail gate evaluated before any core logic runs. Limits are
//! grouped into request classes rather than per-endpoint numbers so
//! handlers only name the class they belong to.

use async_trait::async_trait;
use thiserror::Error;

/// Request class determining which limit applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateLimitClass {
    /// Ordinary admin API traffic.
    General,
    /// Bulk mutations and other sensitive operations.
    Strict,
}

impl RateLimitClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateLimitClass::General => "general",
            RateLimitClass::Strict => "strict",
        }
    }
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed,
    Limited {
        /// Seconds until the caller may retry.
        retry_after_secs: u32,
    },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed)
    }
}

/// Error from the rate limiter backend itself.
#[derive(Debug, Clone, Error)]
#[error("Rate limiter backend error: {0}")]
pub struct RateLimitError(pub String);

/// Port for rate limiting.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Records one request for `key` under `class` and decides whether it
    /// may proceed.
    async fn check(
        &self,
        class: RateLimitClass,
        key: &str,
    ) -> Result<RateLimitDecision, RateLimitError>;
}
