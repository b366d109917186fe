//! Booking lifecycle status.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a booking, stored as the Postgres `booking_status`
/// enum.
///
/// Only PENDING and CONFIRMED bookings hold their seats against other
/// purchasers; every other state releases them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Refunded,
    Failed,
}

impl BookingStatus {
    /// Whether seats under a booking in this state count as sold.
    pub fn blocks_seats(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Whether the booking can move to CONFIRMED.
    pub fn can_confirm(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether the booking can move to CANCELLED.
    pub fn can_cancel(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Uppercase wire/database spelling, for error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
            Self::Refunded => "REFUNDED",
            Self::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pending_confirms() {
        assert!(BookingStatus::Pending.can_confirm());
        assert!(!BookingStatus::Confirmed.can_confirm());
        assert!(!BookingStatus::Cancelled.can_confirm());
        assert!(!BookingStatus::Refunded.can_confirm());
        assert!(!BookingStatus::Failed.can_confirm());
    }

    #[test]
    fn test_cancelled_cannot_cancel_again() {
        assert!(BookingStatus::Pending.can_cancel());
        assert!(BookingStatus::Confirmed.can_cancel());
        assert!(!BookingStatus::Cancelled.can_cancel());
    }

    #[test]
    fn test_seat_blocking_states() {
        assert!(BookingStatus::Pending.blocks_seats());
        assert!(BookingStatus::Confirmed.blocks_seats());
        assert!(!BookingStatus::Cancelled.blocks_seats());
        assert!(!BookingStatus::Refunded.blocks_seats());
        assert!(!BookingStatus::Failed.blocks_seats());
    }
}
