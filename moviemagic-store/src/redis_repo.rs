use std::time::Duration;

use async_trait::async_trait;
use moviemagic_core::StoreError;
use redis::RedisResult;

use crate::rate_limit::RateLimiter;

#[derive(Clone)]
pub struct RedisClient {
    client: redis::Client,
}

impl RedisClient {
    pub async fn new(connection_string: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self { client })
    }

    /// Increments the window counter for `key`, setting its expiry only when the window opens.
    /// Returns the count so far in the window.
    pub async fn incr_window(&self, key: &str, window_seconds: u64) -> RedisResult<i64> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let script = redis::Script::new(r#"
            local current = redis.call("INCR", KEYS[1])
            if current == 1 then
                redis.call("EXPIRE", KEYS[1], ARGV[1])
            end
            return current
        "#);

        script.key(key).arg(window_seconds).invoke_async(&mut conn).await
    }
}

#[async_trait]
impl RateLimiter for RedisClient {
    async fn hit(&self, key: &str, limit: i64, window: Duration) -> Result<bool, StoreError> {
        let count = self
            .incr_window(key, window.as_secs().max(1))
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(count <= limit)
    }
}
