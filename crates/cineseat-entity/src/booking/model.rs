//! Booking and per-seat booking rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::BookingStatus;

/// One purchase transaction over a set of seats for a showtime.
///
/// `final_amount = total_amount - discount_amount` always holds.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub showtime_id: Uuid,
    /// Sum of undiscounted per-seat prices.
    pub total_amount: f64,
    pub discount_amount: f64,
    pub final_amount: f64,
    pub promotion_code: Option<String>,
    pub status: BookingStatus,
    pub payment_method: Option<String>,
    pub transaction_reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for inserting a new booking.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: Uuid,
    pub showtime_id: Uuid,
    pub total_amount: f64,
    pub discount_amount: f64,
    pub final_amount: f64,
    pub promotion_code: Option<String>,
    pub status: BookingStatus,
}

/// Data for inserting a new seat line.
#[derive(Debug, Clone)]
pub struct NewSeatBooking {
    pub booking_id: Uuid,
    pub seat_id: Uuid,
    pub showtime_id: Uuid,
    pub price: f64,
}

/// One seat line inside a booking.
///
/// A row here under a PENDING or CONFIRMED booking is the authoritative
/// "sold" fact; the Redis hold layer is only an optimistic front.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SeatBooking {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub seat_id: Uuid,
    pub showtime_id: Uuid,
    /// Post-discount price, scaled proportionally across the booking.
    pub price: f64,
    /// Set at confirmation; absent while the booking is PENDING.
    pub ticket_code: Option<String>,
    pub is_used: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
