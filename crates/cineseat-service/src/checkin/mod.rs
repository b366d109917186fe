//! Ticket redemption at the door.

pub mod service;
pub mod window;
