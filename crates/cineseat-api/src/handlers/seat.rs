//! Seat hold endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;
use validator::Validate;

use cineseat_core::error::AppError;

use crate::dto::request::SeatSelectionRequest;
use crate::error::ApiError;
use crate::dto::response::{BookedSeatsResponse, SeatSelectionResponse};
use crate::extract::CallerId;
use crate::state::AppState;

/// POST /api/seats/hold
///
/// Holds are per-seat: partial success is a 200 with the breakdown,
/// 409 is reserved for requests where not a single seat was acquired.
pub async fn hold_seats(
    State(state): State<AppState>,
    CallerId(ctx): CallerId,
    Json(req): Json<SeatSelectionRequest>,
) -> Result<Response, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outcome = state
        .seat_service
        .hold(&ctx, req.showtime_id, &req.seat_ids)
        .await?;

    let status = if outcome.all_failed() {
        StatusCode::CONFLICT
    } else {
        StatusCode::OK
    };
    Ok((status, Json(SeatSelectionResponse::from(outcome))).into_response())
}

/// POST /api/seats/release
pub async fn release_seats(
    State(state): State<AppState>,
    CallerId(ctx): CallerId,
    Json(req): Json<SeatSelectionRequest>,
) -> Result<Json<SeatSelectionResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outcome = state
        .seat_service
        .release(&ctx, req.showtime_id, &req.seat_ids)
        .await?;
    Ok(Json(SeatSelectionResponse::from(outcome)))
}

/// GET /api/showtimes/{id}/booked-seats — public listing of
/// permanently sold seats.
pub async fn booked_seats(
    State(state): State<AppState>,
    Path(showtime_id): Path<Uuid>,
) -> Result<Json<BookedSeatsResponse>, ApiError> {
    let seat_ids = state.booking_service.booked_seat_ids(showtime_id).await?;
    Ok(Json(BookedSeatsResponse {
        showtime_id,
        seat_ids,
    }))
}
