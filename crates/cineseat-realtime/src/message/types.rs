//! Inbound and outbound WebSocket message type definitions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cineseat_core::events::SeatEvent;
use cineseat_lockstore::SeatHold;

/// Messages sent by the client to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Start watching a showtime's seat map.
    JoinShowtime {
        /// Showtime to watch.
        showtime_id: Uuid,
    },
    /// Stop watching a showtime.
    LeaveShowtime {
        /// Showtime to leave.
        showtime_id: Uuid,
    },
}

/// Messages sent by the server to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Join confirmed.
    Joined {
        /// Showtime joined.
        showtime_id: Uuid,
    },
    /// Leave confirmed.
    Left {
        /// Showtime left.
        showtime_id: Uuid,
    },
    /// Full hold state of a showtime, sent only to a joining connection.
    Snapshot {
        /// Showtime the snapshot describes.
        showtime_id: Uuid,
        /// Live holds with remaining TTLs.
        holds: Vec<SeatHold>,
    },
    /// A single seat hold change.
    Update {
        /// The lock, unlock, or expiry event.
        #[serde(flatten)]
        event: SeatEvent,
    },
    /// A pending booking was created over the listed seats.
    BookingCreated {
        booking_id: Uuid,
        showtime_id: Uuid,
        seat_ids: Vec<Uuid>,
        holder_id: Uuid,
    },
    /// Seats are permanently sold.
    Booked {
        booking_id: Uuid,
        showtime_id: Uuid,
        seat_ids: Vec<Uuid>,
    },
    /// A booking was cancelled and its seats freed.
    BookingCancelled {
        booking_id: Uuid,
        showtime_id: Uuid,
        seat_ids: Vec<Uuid>,
    },
    /// Protocol or server error.
    Error {
        /// Human-readable description.
        message: String,
    },
}
