//! Seat hold lifecycle events.
//!
//! These are the payloads published on the lock store's
//! `seat_events:{showtime_id}` channels and relayed to WebSocket clients.
//! `SeatExpired` is never published manually; the event relay synthesizes
//! it from the store's key-expiry notifications.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single transient change to a seat's hold state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SeatEvent {
    /// A seat was newly held.
    SeatLocked {
        /// Showtime the seat belongs to.
        showtime_id: Uuid,
        /// The held seat.
        seat_id: Uuid,
        /// Who holds it.
        holder_id: Uuid,
    },
    /// A seat hold was explicitly released by its holder.
    SeatUnlocked {
        /// Showtime the seat belongs to.
        showtime_id: Uuid,
        /// The released seat.
        seat_id: Uuid,
        /// Who released it.
        holder_id: Uuid,
    },
    /// A seat hold reached its TTL and disappeared.
    SeatExpired {
        /// Showtime the seat belongs to.
        showtime_id: Uuid,
        /// The expired seat.
        seat_id: Uuid,
    },
}

impl SeatEvent {
    /// The showtime this event is scoped to.
    pub fn showtime_id(&self) -> Uuid {
        match self {
            Self::SeatLocked { showtime_id, .. }
            | Self::SeatUnlocked { showtime_id, .. }
            | Self::SeatExpired { showtime_id, .. } => *showtime_id,
        }
    }

    /// The seat this event concerns.
    pub fn seat_id(&self) -> Uuid {
        match self {
            Self::SeatLocked { seat_id, .. }
            | Self::SeatUnlocked { seat_id, .. }
            | Self::SeatExpired { seat_id, .. } => *seat_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_tag() {
        let ev = SeatEvent::SeatLocked {
            showtime_id: Uuid::nil(),
            seat_id: Uuid::nil(),
            holder_id: Uuid::nil(),
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["event"], "seat_locked");
        assert!(json["holder_id"].is_string());
    }

    #[test]
    fn test_expired_roundtrip() {
        let ev = SeatEvent::SeatExpired {
            showtime_id: Uuid::new_v4(),
            seat_id: Uuid::new_v4(),
        };
        let json = serde_json::to_string(&ev).unwrap();
        let back: SeatEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ev);
    }
}
