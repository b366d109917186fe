//! Domain entities for the seat booking engine.
//!
//! Models mirror the database schema (`sqlx::FromRow` where rows map
//! directly) and carry the pure business rules that need no I/O:
//! seat pricing, promotion eligibility and discount math, and booking
//! status transitions.

pub mod booking;
pub mod promotion;
pub mod showtime;

pub use booking::{Booking, BookingStatus, NewBooking, NewSeatBooking, SeatBooking, ticket_code};
pub use promotion::{DiscountType, Promotion};
pub use showtime::{Seat, SeatType, Showtime};
