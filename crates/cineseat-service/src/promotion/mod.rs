//! Promotion validation and listing.

pub mod service;
