pub mod app_config;
pub mod booking_repo;
pub mod database;
pub mod notifier;
pub mod rate_limit;
pub mod redis_repo;
pub mod user_repo;

pub use booking_repo::PgBookingStore;
pub use database::DbClient;
pub use notifier::KafkaNotifier;
pub use rate_limit::{InMemoryRateLimiter, RateLimiter};
pub use redis_repo::RedisClient;
pub use user_repo::PgUserDirectory;
