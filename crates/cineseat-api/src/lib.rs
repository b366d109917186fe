//! HTTP and WebSocket API layer.

pub mod app;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;
