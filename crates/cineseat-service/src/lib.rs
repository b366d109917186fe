//! Business services.
//!
//! Each service gets its dependencies injected through its constructor
//! and broadcasts realtime events through the `ShowtimeBroadcast` trait,
//! never through the gateway type directly.

pub mod booking;
pub mod checkin;
pub mod context;
pub mod promotion;
pub mod seat;

pub use booking::service::BookingService;
pub use checkin::service::CheckinService;
pub use context::RequestContext;
pub use promotion::service::PromotionService;
pub use seat::service::SeatHoldService;
