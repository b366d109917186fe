//! Realtime layer: per-showtime broadcast rooms over WebSocket plus the
//! Redis event relay.
//!
//! The gateway owns the connection registry and rooms; the relay feeds
//! it seat events from Redis pub/sub and key-expiry notifications, so
//! every engine instance broadcasts events regardless of which instance
//! caused them.

pub mod connection;
pub mod gateway;
pub mod message;
pub mod relay;
pub mod rooms;

pub use connection::handle::{ConnectionHandle, ConnectionId};
pub use gateway::ShowtimeGateway;
pub use message::types::{InboundMessage, OutboundMessage};
pub use relay::EventRelay;
pub use rooms::ShowtimeRooms;
