//! Seat lock store (Redis) configuration.

use serde::{Deserialize, Serialize};

/// Redis lock store settings.
///
/// The lock store must run with `notify-keyspace-events Ex` so that the
/// event relay receives hold-expiry notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockStoreConfig {
    /// Redis connection URL.
    #[serde(default = "default_url")]
    pub url: String,
    /// Key prefix for all CineSeat keys.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Seat hold time-to-live in seconds.
    #[serde(default = "default_hold_ttl")]
    pub hold_ttl_seconds: u64,
}

impl Default for LockStoreConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            key_prefix: default_key_prefix(),
            hold_ttl_seconds: default_hold_ttl(),
        }
    }
}

fn default_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_key_prefix() -> String {
    "cineseat:".to_string()
}

fn default_hold_ttl() -> u64 {
    300
}
