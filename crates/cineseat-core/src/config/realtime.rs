//! Real-time WebSocket configuration.

use serde::{Deserialize, Serialize};

/// Real-time gateway settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Per-connection outbound message buffer size.
    #[serde(default = "default_buffer_size")]
    pub channel_buffer_size: usize,
    /// Delay between relay reconnect attempts in seconds.
    #[serde(default = "default_reconnect_delay")]
    pub relay_reconnect_delay_seconds: u64,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_buffer_size(),
            relay_reconnect_delay_seconds: default_reconnect_delay(),
        }
    }
}

fn default_buffer_size() -> usize {
    64
}

fn default_reconnect_delay() -> u64 {
    5
}
