//! Booking creation, confirmation, and cancellation.

pub mod pricing;
pub mod service;
