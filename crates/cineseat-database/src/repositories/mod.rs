//! Repository implementations.

pub mod booking;
pub mod promotion;
pub mod showtime;

pub use booking::BookingRepository;
pub use promotion::PromotionRepository;
pub use showtime::ShowtimeRepository;
