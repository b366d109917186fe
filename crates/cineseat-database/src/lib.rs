//! PostgreSQL persistence for CineSeat.
//!
//! The booking transaction is composed in the service layer from the
//! repositories' `_tx` variants, which run against a caller-provided
//! connection so every write of one purchase shares a single
//! transaction.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
