//! Typed domain events broadcast to showtime viewers.

pub mod booking;
pub mod seat;

pub use booking::BookingEvent;
pub use seat::SeatEvent;
