//! # cineseat-core
//!
//! Core crate for CineSeat. Contains configuration schemas, domain events,
//! the broadcast trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other CineSeat crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
