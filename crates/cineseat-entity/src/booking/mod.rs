//! Booking aggregate: the booking row, its per-seat lines, and ticket codes.

pub mod model;
pub mod status;
pub mod ticket;

pub use model::{Booking, NewBooking, NewSeatBooking, SeatBooking};
pub use status::BookingStatus;
pub use ticket::ticket_code;
