use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_extra::headers::{authorization::Bearer, Authorization};
use axum_extra::TypedHeader;
use chrono::Utc;
use serde::Deserialize;
use stellar_domain::{
    Booking, BookingDetail, BookingStatus, CreateBookingRequest, Invoice, UpdateBookingRequest,
};
use uuid::Uuid;

use crate::auth::requester_id;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings", get(list_bookings).post(create_booking))
        .route(
            "/v1/bookings/{id}",
            get(booking_detail).put(update_booking).delete(cancel_booking),
        )
        .route("/v1/bookings/{id}/invoice", get(booking_invoice))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    status: Option<String>,
}

async fn create_booking(
    State(state): State<AppState>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let requester = requester_id(bearer.token(), &state.auth.secret)?;
    let booking = state.engine.create_booking(req, requester).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

async fn list_bookings(
    State(state): State<AppState>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let requester = requester_id(bearer.token(), &state.auth.secret)?;
    let status = query.status.as_deref().map(parse_status).transpose()?;
    let bookings = state.engine.list_bookings(requester, status).await?;
    Ok(Json(bookings))
}

async fn booking_detail(
    State(state): State<AppState>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingDetail>, AppError> {
    let requester = requester_id(bearer.token(), &state.auth.secret)?;
    let now = Utc::now();
    let detail = state
        .engine
        .booking_detail(id, requester, now.date_naive(), now)
        .await?;
    Ok(Json(detail))
}

async fn update_booking(
    State(state): State<AppState>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdateBookingRequest>,
) -> Result<Json<Booking>, AppError> {
    let requester = requester_id(bearer.token(), &state.auth.secret)?;
    let booking = state.engine.update_booking(id, update, requester).await?;
    Ok(Json(booking))
}

async fn cancel_booking(
    State(state): State<AppState>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let requester = requester_id(bearer.token(), &state.auth.secret)?;
    state.engine.cancel_booking(id, requester).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn booking_invoice(
    State(state): State<AppState>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Invoice>, AppError> {
    let requester = requester_id(bearer.token(), &state.auth.secret)?;
    let invoice = state.engine.invoice(id, requester, Utc::now()).await?;
    Ok(Json(invoice))
}

fn parse_status(raw: &str) -> Result<BookingStatus, AppError> {
    match raw.to_ascii_uppercase().as_str() {
        "CONFIRMED" => Ok(BookingStatus::Confirmed),
        "CANCELLED" => Ok(BookingStatus::Cancelled),
        other => Err(AppError::BadRequest(format!(
            "Unknown booking status: {other}"
        ))),
    }
}
