//! HTTP and WebSocket handlers.

pub mod booking;
pub mod health;
pub mod promotion;
pub mod seat;
pub mod ws;
