//! Distributed seat hold layer on Redis.
//!
//! A hold is a Redis key with a TTL whose value is the holder's user id.
//! `SET NX EX` makes acquisition atomic, so the store linearizes
//! competing holds per seat without any application-side locking. Holds
//! are advisory: the booking transaction in `cineseat-database` remains
//! the authoritative double-sell guard.

pub mod client;
pub mod keys;
pub mod manager;
pub mod types;

pub use client::RedisClient;
pub use keys::SeatLockKey;
pub use manager::SeatLockManager;
pub use types::{HoldOutcome, SeatHold, SeatHoldFailure};
