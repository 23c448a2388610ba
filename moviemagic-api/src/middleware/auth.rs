use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use moviemagic_core::CallerIdentity;
use serde::{Deserialize, Serialize};

use crate::{error::AppError, state::{AppState, AuthConfig}};

// ============================================================================
// JWT Claims
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Username
    pub sub: String,
    pub exp: usize,
}

pub fn issue_token(auth: &AuthConfig, username: &str) -> anyhow::Result<String> {
    let claims = Claims {
        sub: username.to_string(),
        exp: (Utc::now() + Duration::seconds(auth.expiration as i64)).timestamp() as usize,
    };

    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(auth.secret.as_bytes()))?;
    Ok(token)
}

pub fn verify_token(auth: &AuthConfig, token: &str) -> Option<CallerIdentity> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(auth.secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|data| CallerIdentity::new(data.claims.sub))
}

// ============================================================================
// Identity Middleware
// ============================================================================

/// Resolves the bearer token, if any, into a `CallerIdentity` request extension.
/// Missing or invalid tokens leave the request anonymous; rejecting is up to the route.
pub async fn identity_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let identity = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .and_then(|header| verify_token(&state.auth, header.token()));

    if let Some(identity) = identity {
        req.extensions_mut().insert(identity);
    }

    next.run(req).await
}

/// Rejects anonymous requests with 401
pub async fn require_identity(req: Request, next: Next) -> Result<Response, AppError> {
    if req.extensions().get::<CallerIdentity>().is_none() {
        return Err(AppError::AuthenticationError("Not authenticated".to_string()));
    }
    Ok(next.run(req).await)
}

// ============================================================================
// Extractor
// ============================================================================

/// The caller resolved by `identity_middleware`, or `None` for anonymous requests.
pub struct MaybeCaller(pub Option<CallerIdentity>);

impl<S> FromRequestParts<S> for MaybeCaller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeCaller(parts.extensions.get::<CallerIdentity>().cloned()))
    }
}
