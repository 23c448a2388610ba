use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, state::AppState};

/// Per-IP fixed-window limit. Limiter errors fail open.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(limiter) = state.rate_limiter.as_ref() else {
        return Ok(next.run(req).await);
    };

    let key = format!("ratelimit:{}", addr.ip());

    match limiter
        .hit(&key, state.rate_limit.requests, state.rate_limit.window())
        .await
    {
        Ok(true) => Ok(next.run(req).await),
        Ok(false) => {
            tracing::debug!("Rate limit exceeded for {}", addr.ip());
            Err(AppError::TooManyRequests("Rate limit exceeded".to_string()))
        }
        Err(e) => {
            tracing::warn!("Rate limiter unavailable: {}", e);
            Ok(next.run(req).await)
        }
    }
}
