use axum::{
    http::Method,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod bookings;
pub mod error;
pub mod middleware;
pub mod movies;
pub mod state;

pub use state::{AppState, AuthConfig};

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    let protected = Router::new()
        .merge(movies::routes())
        .merge(bookings::protected_routes())
        .route_layer(axum::middleware::from_fn(middleware::require_identity));

    let mut router = Router::new()
        .route("/health", get(health))
        .merge(auth::routes())
        .merge(bookings::routes())
        .merge(protected)
        .layer(axum::middleware::from_fn_with_state(state.clone(), middleware::identity_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Needs ConnectInfo from the listener (or MockConnectInfo in tests)
    if state.rate_limiter.is_some() {
        router = router.layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit_middleware,
        ));
    }

    router.with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
