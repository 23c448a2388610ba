use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moviemagic_core::StoreError;

/// Fixed-window request counter.
///
/// A window opens on the first hit for a key and lasts exactly `window`;
/// later hits inside it never push its end back.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Counts one hit for `key`. Returns false once more than `limit` hits landed in the current window.
    async fn hit(&self, key: &str, limit: i64, window: Duration) -> Result<bool, StoreError>;
}

/// Process-local limiter for single-instance deployments without Redis.
#[derive(Default)]
pub struct InMemoryRateLimiter {
    windows: Mutex<HashMap<String, (Instant, i64)>>,
}

impl InMemoryRateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    fn hit_at(&self, key: &str, limit: i64, window: Duration, now: Instant) -> bool {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());

        if !windows.contains_key(key) {
            windows.retain(|_, (opened, _)| now.duration_since(*opened) < window);
        }

        let entry = windows.entry(key.to_string()).or_insert((now, 0));
        if now.duration_since(entry.0) >= window {
            *entry = (now, 0);
        }
        entry.1 += 1;

        entry.1 <= limit
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn hit(&self, key: &str, limit: i64, window: Duration) -> Result<bool, StoreError> {
        Ok(self.hit_at(key, limit, window, Instant::now()))
    }
}
