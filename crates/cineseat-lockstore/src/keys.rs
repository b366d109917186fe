//! Seat lock key and channel builders.
//!
//! Centralising key construction keeps the format in one place; the
//! event relay depends on [`SeatLockKey::decode`] to turn raw key-expiry
//! notifications back into typed events.

use uuid::Uuid;

/// Structured form of a seat lock key:
/// `{prefix}seat_lock:{showtime_id}:{seat_id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatLockKey {
    pub showtime_id: Uuid,
    pub seat_id: Uuid,
}

impl SeatLockKey {
    pub fn new(showtime_id: Uuid, seat_id: Uuid) -> Self {
        Self {
            showtime_id,
            seat_id,
        }
    }

    /// Render the full Redis key under the given prefix.
    pub fn encode(&self, prefix: &str) -> String {
        format!("{prefix}seat_lock:{}:{}", self.showtime_id, self.seat_id)
    }

    /// Parse a full Redis key back into its parts.
    ///
    /// Returns `None` for keys that are not seat locks under this prefix,
    /// so the relay can ignore foreign expired keys.
    pub fn decode(prefix: &str, key: &str) -> Option<Self> {
        let rest = key.strip_prefix(prefix)?.strip_prefix("seat_lock:")?;
        let (showtime, seat) = rest.split_once(':')?;
        Some(Self {
            showtime_id: showtime.parse().ok()?,
            seat_id: seat.parse().ok()?,
        })
    }
}

/// Pattern matching every seat lock of one showtime, for snapshots.
pub fn showtime_locks_pattern(prefix: &str, showtime_id: Uuid) -> String {
    format!("{prefix}seat_lock:{showtime_id}:*")
}

/// Pub/sub channel carrying seat events for one showtime.
pub fn seat_events_channel(prefix: &str, showtime_id: Uuid) -> String {
    format!("{prefix}seat_events:{showtime_id}")
}

/// Pattern the relay psubscribes to for all showtimes' seat events.
pub fn seat_events_pattern(prefix: &str) -> String {
    format!("{prefix}seat_events:*")
}

/// Pattern matching Redis key-expiry notifications on any database.
pub const EXPIRED_EVENTS_PATTERN: &str = "__keyevent@*__:expired";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let key = SeatLockKey::new(Uuid::new_v4(), Uuid::new_v4());
        let encoded = key.encode("cineseat:");
        assert_eq!(SeatLockKey::decode("cineseat:", &encoded), Some(key));
    }

    #[test]
    fn test_encode_format() {
        let key = SeatLockKey::new(Uuid::nil(), Uuid::nil());
        assert_eq!(
            key.encode("cineseat:"),
            "cineseat:seat_lock:00000000-0000-0000-0000-000000000000:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_decode_rejects_foreign_keys() {
        assert_eq!(SeatLockKey::decode("cineseat:", "cineseat:session:abc"), None);
        assert_eq!(
            SeatLockKey::decode("cineseat:", "other:seat_lock:a:b"),
            None
        );
        assert_eq!(
            SeatLockKey::decode("cineseat:", "cineseat:seat_lock:not-a-uuid:also-not"),
            None
        );
    }

    #[test]
    fn test_channel_and_pattern() {
        let id = Uuid::nil();
        assert_eq!(
            seat_events_channel("cineseat:", id),
            "cineseat:seat_events:00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(seat_events_pattern("cineseat:"), "cineseat:seat_events:*");
    }
}
