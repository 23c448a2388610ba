//! Fixed-window rate limiting against a real Redis.
//!
//! # Running These Tests
//!
//! These tests are marked as `#[ignore]` because they need a running Redis
//! server and take a few seconds of wall-clock time. Point `REDIS_URL` at a
//! server (defaults to `redis://127.0.0.1:6379`) and run:
//!
//! ```bash
//! cargo test -p moviemagic-store --test redis_rate_limit -- --ignored
//! ```

use std::time::Duration;

use moviemagic_store::rate_limit::RateLimiter;
use moviemagic_store::RedisClient;

async fn redis() -> RedisClient {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
    RedisClient::new(&url).await.expect("Failed to open Redis client")
}

fn unique_key() -> String {
    format!("ratelimit:test:{}", uuid::Uuid::new_v4())
}

#[tokio::test]
#[ignore = "requires a running Redis"]
async fn test_limit_applies_within_window() {
    let redis = redis().await;
    let key = unique_key();
    let window = Duration::from_secs(10);

    assert!(redis.hit(&key, 2, window).await.unwrap());
    assert!(redis.hit(&key, 2, window).await.unwrap());
    assert!(!redis.hit(&key, 2, window).await.unwrap());
}

#[tokio::test]
#[ignore = "requires a running Redis"]
async fn test_spaced_hits_do_not_extend_window() {
    let redis = redis().await;
    let key = unique_key();
    let window = Duration::from_secs(2);

    assert!(redis.hit(&key, 2, window).await.unwrap());
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(redis.hit(&key, 2, window).await.unwrap());

    // 2.5s after the first hit: the window it opened has expired, even though
    // the second hit landed only 1s ago
    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert!(redis.hit(&key, 2, window).await.unwrap());
}
