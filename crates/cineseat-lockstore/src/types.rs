//! Result types for hold operations.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A live hold observed in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatHold {
    pub seat_id: Uuid,
    pub holder_id: Uuid,
    /// Remaining lifetime of the hold.
    pub ttl_seconds: i64,
}

/// One seat that could not be held or released, with the reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatHoldFailure {
    pub seat_id: Uuid,
    pub reason: String,
}

/// Per-seat breakdown of a hold or release attempt.
///
/// Hold operations are not all-or-nothing: each seat succeeds or fails
/// independently and the caller decides how to present partial results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HoldOutcome {
    /// Seats acquired (or released) by this call.
    pub held: Vec<Uuid>,
    /// Seats that failed, with per-seat reasons.
    pub failed: Vec<SeatHoldFailure>,
}

impl HoldOutcome {
    /// True when not a single seat succeeded.
    pub fn all_failed(&self) -> bool {
        self.held.is_empty() && !self.failed.is_empty()
    }

    /// True when every requested seat succeeded.
    pub fn all_held(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_failed() {
        let mut outcome = HoldOutcome::default();
        assert!(!outcome.all_failed());
        outcome.failed.push(SeatHoldFailure {
            seat_id: Uuid::new_v4(),
            reason: "seat is held by another user".to_string(),
        });
        assert!(outcome.all_failed());
        outcome.held.push(Uuid::new_v4());
        assert!(!outcome.all_failed());
        assert!(!outcome.all_held());
    }
}
