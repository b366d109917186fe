//! Traits at crate seams.

pub mod broadcast;

pub use broadcast::ShowtimeBroadcast;
