use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    routing::{get, post},
    Json, Router,
};
use moviemagic_core::{Booking, BookingReceipt, BookingRequest, CallerIdentity, CoreError};
use serde::Serialize;
use serde_json::Value;

use crate::{error::AppError, middleware::MaybeCaller, state::AppState};

#[derive(Debug, Serialize)]
pub struct TicketsResponse {
    pub bookings: Vec<Booking>,
}

/// Booking creation stays reachable for anonymous callers so the workflow can reject them itself
pub fn routes() -> Router<AppState> {
    Router::new().route("/booking", post(make_booking))
}

pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/tickets", get(list_tickets))
}

/// POST /booking
///
/// The body is taken as a fallible extractor so an anonymous caller gets 401
/// no matter what it sent.
async fn make_booking(
    State(state): State<AppState>,
    MaybeCaller(caller): MaybeCaller,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<BookingReceipt>, AppError> {
    let caller = caller.ok_or(CoreError::Unauthenticated)?;
    let Json(body) = body.map_err(|e| AppError::ValidationError(e.body_text()))?;
    let req = BookingRequest::from_json(body)
        .map_err(|_| AppError::ValidationError("Invalid booking request".to_string()))?;

    let receipt = state.workflow.create_booking(Some(&caller), req).await?;
    Ok(Json(receipt))
}

/// GET /tickets
async fn list_tickets(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
) -> Json<TicketsResponse> {
    let bookings = state.workflow.list_bookings_for_user(&caller).await;
    Json(TicketsResponse { bookings })
}
