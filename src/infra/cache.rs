//! Redis cache implementation.
//!
//! Backs the fixed-window rate limiter and the health probe.

use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};

use crate::config::{Config, CACHE_HEALTH_KEY, CACHE_PREFIX_RATE_LIMIT};
use crate::errors::{AppError, AppResult};

/// Redis wrapper with a shared connection manager.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
}

/// Outcome of one rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Requests seen in the current window, this one included
    pub count: u64,
    pub allowed: bool,
}

impl RateLimitDecision {
    fn new(count: u64, max_requests: u64) -> Self {
        Self {
            count,
            allowed: count <= max_requests,
        }
    }

    pub fn remaining(&self, max_requests: u64) -> u64 {
        max_requests.saturating_sub(self.count)
    }
}

impl Cache {
    /// Connect to Redis.
    pub async fn try_connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!("Redis cache connected");

        Ok(Self { connection })
    }

    /// Round-trip a short-lived key.
    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection.clone();
        conn.set_ex::<_, _, ()>(CACHE_HEALTH_KEY, "ok", 10)
            .await
            .map_err(cache_error)?;
        let exists: bool = conn.exists(CACHE_HEALTH_KEY).await.map_err(cache_error)?;
        if exists {
            Ok(())
        } else {
            Err(AppError::internal("Cache health key vanished"))
        }
    }

    /// Count a request against a fixed window.
    ///
    /// `INCR` and `TTL` run in one MULTI block, so concurrent requests never
    /// lose a count. A counter without a TTL gets the window as its expiry;
    /// that covers the first request of a window and any counter left
    /// behind without one.
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<RateLimitDecision> {
        let key = rate_limit_key(identifier);
        let mut conn = self.connection.clone();

        let (count, ttl): (i64, i64) = redis::pipe()
            .atomic()
            .incr(&key, 1)
            .ttl(&key)
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;

        if needs_expiry(ttl) {
            let _: () = conn
                .expire(&key, window_seconds as i64)
                .await
                .map_err(cache_error)?;
        }

        Ok(RateLimitDecision::new(count.max(0) as u64, max_requests))
    }
}

/// `TTL` answers -1 for a key without expiry and -2 for a missing key
fn needs_expiry(ttl: i64) -> bool {
    ttl < 0
}

fn rate_limit_key(identifier: &str) -> String {
    format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier)
}

fn cache_error(e: RedisError) -> AppError {
    tracing::error!("Redis error: {}", e);
    AppError::internal(format!("Cache error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_key() {
        assert_eq!(rate_limit_key("auth:10.0.0.1"), "rate_limit:auth:10.0.0.1");
    }

    #[test]
    fn test_counter_without_ttl_gets_one() {
        assert!(needs_expiry(-1));
        assert!(needs_expiry(-2));
        assert!(!needs_expiry(0));
        assert!(!needs_expiry(59));
    }

    #[test]
    fn test_decision_allows_up_to_max() {
        assert!(RateLimitDecision::new(10, 10).allowed);
        let over = RateLimitDecision::new(11, 10);
        assert!(!over.allowed);
        assert_eq!(over.remaining(10), 0);
        assert_eq!(RateLimitDecision::new(3, 10).remaining(10), 7);
    }
}
