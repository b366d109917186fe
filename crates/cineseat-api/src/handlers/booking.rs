//! Booking endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;
use validator::Validate;

use cineseat_core::error::AppError;
use cineseat_core::types::pagination::PageResponse;
use cineseat_entity::Booking;
use cineseat_service::booking::service::{BookingDetail, ConfirmBooking, CreateBooking};
use cineseat_service::checkin::service::CheckinResult;

use crate::dto::request::{
    BookingListQuery, CheckinRequest, ConfirmBookingRequest, CreateBookingRequest,
};
use crate::error::ApiError;
use crate::extract::CallerId;
use crate::state::AppState;

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    CallerId(ctx): CallerId,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Response, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let detail = state
        .booking_service
        .create_booking(
            &ctx,
            CreateBooking {
                showtime_id: req.showtime_id,
                seat_ids: req.seat_ids,
                promotion_code: req.promotion_code,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(detail)).into_response())
}

/// GET /api/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    CallerId(ctx): CallerId,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingDetail>, ApiError> {
    let detail = state.booking_service.get_booking(&ctx, booking_id).await?;
    Ok(Json(detail))
}

/// GET /api/bookings — the caller's booking history.
pub async fn list_bookings(
    State(state): State<AppState>,
    CallerId(ctx): CallerId,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<PageResponse<Booking>>, ApiError> {
    let page = state
        .booking_service
        .list_user_bookings(&ctx, query.status, &query.page_request())
        .await?;
    Ok(Json(page))
}

/// POST /api/bookings/{id}/confirm
pub async fn confirm_booking(
    State(state): State<AppState>,
    CallerId(ctx): CallerId,
    Path(booking_id): Path<Uuid>,
    Json(req): Json<ConfirmBookingRequest>,
) -> Result<Json<BookingDetail>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let detail = state
        .booking_service
        .confirm_booking(
            &ctx,
            booking_id,
            ConfirmBooking {
                payment_method: req.payment_method,
                transaction_reference: req.transaction_reference,
            },
        )
        .await?;
    Ok(Json(detail))
}

/// POST /api/bookings/{id}/cancel
pub async fn cancel_booking(
    State(state): State<AppState>,
    CallerId(ctx): CallerId,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingDetail>, ApiError> {
    let detail = state
        .booking_service
        .cancel_booking(&ctx, booking_id)
        .await?;
    Ok(Json(detail))
}

/// POST /api/bookings/{id}/checkin
pub async fn checkin(
    State(state): State<AppState>,
    CallerId(ctx): CallerId,
    Path(booking_id): Path<Uuid>,
    Json(req): Json<CheckinRequest>,
) -> Result<Json<CheckinResult>, ApiError> {
    let result = state
        .checkin_service
        .checkin(&ctx, booking_id, req.ticket_id)
        .await?;
    Ok(Json(result))
}
