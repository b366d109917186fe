//! Check-in window classification.

use chrono::{DateTime, Duration, Utc};

/// Where "now" falls relative to a showtime's redemption window.
///
/// The window opens a configured number of minutes before the showtime
/// starts and closes when it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCheck {
    TooEarly,
    Open,
    TooLate,
}

pub fn classify(
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    open_minutes_before: i64,
    now: DateTime<Utc>,
) -> WindowCheck {
    let opens_at = start_time - Duration::minutes(open_minutes_before);
    if now < opens_at {
        WindowCheck::TooEarly
    } else if now > end_time {
        WindowCheck::TooLate
    } else {
        WindowCheck::Open
    }
}
