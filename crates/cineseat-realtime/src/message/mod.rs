//! WebSocket wire protocol.

pub mod types;
