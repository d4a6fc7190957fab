//! Redis-backed rate limiter implementation for production deployments.
//!
//! Uses a fixed-window counter algorithm with Redis INCR + EXPIRE, so
//! limits hold across multiple servers. Window boundaries can briefly
//! admit more than the limit; acceptable for an admin API gate.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::ports::{RateLimitClass, RateLimitDecision, RateLimitError, RateLimiter};

/// Requests per minute for each class.
fn limit_for(class: RateLimitClass) -> u32 {
    match class {
        RateLimitClass::General => 60,
        RateLimitClass::Strict => 3,
    }
}

const WINDOW_SECS: i64 = 60;

/// Redis-backed rate limiter.
#[derive(Clone)]
pub struct RedisRateLimiter {
    conn: MultiplexedConnection,
}

impl RedisRateLimiter {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn check(
        &self,
        class: RateLimitClass,
        key: &str,
    ) -> Result<RateLimitDecision, RateLimitError> {
        let limit = limit_for(class);
        let redis_key = format!("ratelimit:{}:{}", class.as_str(), key);

        let mut conn = self.conn.clone();

        // Atomic increment; first hit in a window also sets the expiry
        let count: i64 = conn
            .incr(&redis_key, 1_i64)
            .await
            .map_err(|e: redis::RedisError| RateLimitError(e.to_string()))?;

        if count == 1 {
            conn.expire::<_, ()>(&redis_key, WINDOW_SECS)
                .await
                .map_err(|e: redis::RedisError| RateLimitError(e.to_string()))?;
        }

        if count as u32 > limit {
            let ttl: i64 = conn
                .ttl(&redis_key)
                .await
                .map_err(|e: redis::RedisError| RateLimitError(e.to_string()))?;
            let retry_after = if ttl > 0 { ttl } else { WINDOW_SECS } as u32;

            return Ok(RateLimitDecision::Limited {
                retry_after_secs: retry_after.max(1),
            });
        }

        Ok(RateLimitDecision::Allowed)
    }
}
