//! Seat hold operations.

pub mod service;
