use std::sync::Arc;

use moviemagic_core::{BookingWorkflow, UserDirectory};
use moviemagic_store::app_config::RateLimitConfig;
use moviemagic_store::RateLimiter;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<BookingWorkflow>,
    pub users: Arc<dyn UserDirectory>,
    /// No rate limiting layer is installed when this is `None`
    pub rate_limiter: Option<Arc<dyn RateLimiter>>,
    pub rate_limit: RateLimitConfig,
    pub auth: AuthConfig,
}
