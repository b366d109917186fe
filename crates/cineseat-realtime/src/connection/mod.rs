//! WebSocket connection handles.

pub mod handle;
