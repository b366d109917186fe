//! Booking lifecycle events.
//!
//! Unlike [`super::SeatEvent`], these originate in the service layer and
//! are broadcast directly to the showtime group. `SeatsBooked` is the
//! permanent commitment: clients gray those seats out for the showtime's
//! lifetime.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A change to a booking visible to everyone viewing its showtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BookingEvent {
    /// A pending booking was created over the listed seats.
    BookingCreated {
        /// The new booking.
        booking_id: Uuid,
        /// Showtime the booking is for.
        showtime_id: Uuid,
        /// Seats included in the booking.
        seat_ids: Vec<Uuid>,
        /// The purchasing user.
        holder_id: Uuid,
    },
    /// Payment was confirmed; the seats are permanently sold.
    SeatsBooked {
        /// The confirmed booking.
        booking_id: Uuid,
        /// Showtime the booking is for.
        showtime_id: Uuid,
        /// Seats now permanently unavailable.
        seat_ids: Vec<Uuid>,
    },
    /// The booking was cancelled and its seats freed.
    BookingCancelled {
        /// The cancelled booking.
        booking_id: Uuid,
        /// Showtime the booking was for.
        showtime_id: Uuid,
        /// Seats released back to the pool.
        seat_ids: Vec<Uuid>,
    },
}

impl BookingEvent {
    /// The showtime this event is scoped to.
    pub fn showtime_id(&self) -> Uuid {
        match self {
            Self::BookingCreated { showtime_id, .. }
            | Self::SeatsBooked { showtime_id, .. }
            | Self::BookingCancelled { showtime_id, .. } => *showtime_id,
        }
    }
}
