//! Booking and check-in configuration.

use serde::{Deserialize, Serialize};

/// Booking workflow settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// How many minutes before showtime start check-in opens.
    #[serde(default = "default_checkin_open_minutes")]
    pub checkin_open_minutes_before: i64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            checkin_open_minutes_before: default_checkin_open_minutes(),
        }
    }
}

fn default_checkin_open_minutes() -> i64 {
    15
}
