//! Response bodies.

use serde::Serialize;
use uuid::Uuid;

use cineseat_lockstore::{HoldOutcome, SeatHoldFailure};

/// Per-seat breakdown of a hold or release attempt.
#[derive(Debug, Clone, Serialize)]
pub struct SeatSelectionResponse {
    pub held: Vec<Uuid>,
    pub failed: Vec<SeatHoldFailure>,
}

impl From<HoldOutcome> for SeatSelectionResponse {
    fn from(outcome: HoldOutcome) -> Self {
        Self {
            held: outcome.held,
            failed: outcome.failed,
        }
    }
}

/// Permanently sold seats of a showtime.
#[derive(Debug, Clone, Serialize)]
pub struct BookedSeatsResponse {
    pub showtime_id: Uuid,
    pub seat_ids: Vec<Uuid>,
}

/// Health probe result.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub lock_store: bool,
}
