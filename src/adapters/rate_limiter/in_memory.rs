//! In-memory rate limiter implementation for testing and development.
//!
//! Uses a fixed-window counter algorithm with an in-memory HashMap.
//! Not suitable for production multi-server deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::ports::{RateLimitClass, RateLimitDecision, RateLimitError, RateLimiter};

/// Requests per minute for each class.
fn limit_for(class: RateLimitClass) -> u32 {
    match class {
        RateLimitClass::General => 60,
        RateLimitClass::Strict => 3,
    }
}

const WINDOW_SECS: i64 = 60;

/// State for a single rate limit window.
#[derive(Debug, Clone)]
struct WindowState {
    count: u32,
    window_start: i64,
}

/// In-memory rate limiter for single-server deployments.
pub struct InMemoryRateLimiter {
    windows: Arc<RwLock<HashMap<String, WindowState>>>,
}

impl InMemoryRateLimiter {
    pub fn new() -> Self {
        Self {
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(
        &self,
        class: RateLimitClass,
        key: &str,
    ) -> Result<RateLimitDecision, RateLimitError> {
        let limit = limit_for(class);
        let now = Timestamp::now().as_unix_secs();
        let window_key = format!("ratelimit:{}:{}", class.as_str(), key);

        let mut windows = self.windows.write().await;
        let state = windows.entry(window_key).or_insert(WindowState {
            count: 0,
            window_start: now,
        });

        if now >= state.window_start + WINDOW_SECS {
            state.count = 0;
            state.window_start = now;
        }

        if state.count >= limit {
            let retry_after = (state.window_start + WINDOW_SECS - now).max(1) as u32;
            return Ok(RateLimitDecision::Limited {
                retry_after_secs: retry_after,
            });
        }

        state.count += 1;
        Ok(RateLimitDecision::Allowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allows_up_to_the_class_limit() {
        let limiter = InMemoryRateLimiter::new();

        for _ in 0..3 {
            let decision = limiter
                .check(RateLimitClass::Strict, "admin-1")
                .await
                .unwrap();
            assert!(decision.is_allowed());
        }

        let fourth = limiter
            .check(RateLimitClass::Strict, "admin-1")
            .await
            .unwrap();
        assert!(matches!(fourth, RateLimitDecision::Limited { .. }));
    }

    #[tokio::test]
    async fn keys_are_isolated() {
        let limiter = InMemoryRateLimiter::new();

        for _ in 0..3 {
            limiter
                .check(RateLimitClass::Strict, "admin-1")
                .await
                .unwrap();
        }

        let other = limiter
            .check(RateLimitClass::Strict, "admin-2")
            .await
            .unwrap();
        assert!(other.is_allowed());
    }

    #[tokio::test]
    async fn classes_are_isolated() {
        let limiter = InMemoryRateLimiter::new();

        for _ in 0..3 {
            limiter
                .check(RateLimitClass::Strict, "admin-1")
                .await
                .unwrap();
        }

        let general = limiter
            .check(RateLimitClass::General, "admin-1")
            .await
            .unwrap();
        assert!(general.is_allowed());
    }

    #[tokio::test]
    async fn limited_decision_carries_retry_after() {
        let limiter = InMemoryRateLimiter::new();
        for _ in 0..3 {
            limiter
                .check(RateLimitClass::Strict, "admin-1")
                .await
                .unwrap();
        }

        match limiter
            .check(RateLimitClass::Strict, "admin-1")
            .await
            .unwrap()
        {
            RateLimitDecision::Limited { retry_after_secs } => {
                assert!(retry_after_secs >= 1 && retry_after_secs <= 60);
            }
            RateLimitDecision::Allowed => panic!("expected Limited"),
        }
    }
}
