use anyhow::anyhow;
use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use moviemagic_core::User;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::AppError,
    middleware::{auth::issue_token, MaybeCaller},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout).post(logout))
        .route("/check-auth", get(check_auth))
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let username = req.username.trim();
    let email = req.email.trim();

    if username.is_empty() || req.password.is_empty() || email.is_empty() {
        return Err(AppError::ValidationError(
            "Username, password and email are required".to_string(),
        ));
    }

    let password_hash = hash_password(&req.password)?;
    let user = User::new(username.to_string(), password_hash, email.to_string());

    state.users.create_user(&user).await?;

    info!("Registered user {}", username);
    Ok(Json(SuccessResponse { success: true }))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let invalid = || AppError::AuthenticationError("Invalid username or password".to_string());

    let user = state
        .users
        .get_user(req.username.trim())
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(invalid());
    }

    let token = issue_token(&state.auth, &user.username)?;

    Ok(Json(LoginResponse { success: true, token }))
}

/// Tokens are stateless; the client drops its copy.
async fn logout() -> Json<SuccessResponse> {
    Json(SuccessResponse { success: true })
}

async fn check_auth(MaybeCaller(caller): MaybeCaller) -> Json<AuthStatusResponse> {
    Json(AuthStatusResponse {
        authenticated: caller.is_some(),
    })
}

// Argon2id with a random salt; output is a self-describing PHC string
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Password hashing failed: {}", e))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash is malformed: {}", e);
            false
        }
    }
}
