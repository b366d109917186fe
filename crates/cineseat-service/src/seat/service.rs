//! Seat hold service: input validation in front of the lock manager.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use cineseat_core::error::AppError;
use cineseat_core::result::AppResult;
use cineseat_lockstore::{HoldOutcome, SeatLockManager};

use crate::context::RequestContext;

/// Validates hold requests and delegates to the lock manager.
#[derive(Clone)]
pub struct SeatHoldService {
    lock_manager: Arc<SeatLockManager>,
}

impl SeatHoldService {
    pub fn new(lock_manager: Arc<SeatLockManager>) -> Self {
        Self { lock_manager }
    }

    /// Try to hold seats for the caller.
    pub async fn hold(
        &self,
        ctx: &RequestContext,
        showtime_id: Uuid,
        seat_ids: &[Uuid],
    ) -> AppResult<HoldOutcome> {
        validate_seat_ids(seat_ids)?;

        let outcome = self
            .lock_manager
            .hold_seats(showtime_id, seat_ids, ctx.user_id)
            .await?;

        info!(
            user_id = %ctx.user_id,
            %showtime_id,
            held = outcome.held.len(),
            failed = outcome.failed.len(),
            "Seat hold request processed"
        );
        Ok(outcome)
    }

    /// Release seats held by the caller.
    pub async fn release(
        &self,
        ctx: &RequestContext,
        showtime_id: Uuid,
        seat_ids: &[Uuid],
    ) -> AppResult<HoldOutcome> {
        validate_seat_ids(seat_ids)?;

        let outcome = self
            .lock_manager
            .release_seats(showtime_id, seat_ids, ctx.user_id)
            .await?;

        info!(
            user_id = %ctx.user_id,
            %showtime_id,
            released = outcome.held.len(),
            failed = outcome.failed.len(),
            "Seat release request processed"
        );
        Ok(outcome)
    }
}

fn validate_seat_ids(seat_ids: &[Uuid]) -> AppResult<()> {
    if seat_ids.is_empty() {
        return Err(AppError::validation("seat_ids must not be empty"));
    }
    let mut seen = std::collections::HashSet::new();
    for id in seat_ids {
        if !seen.insert(id) {
            return Err(AppError::validation(format!(
                "duplicate seat id {id} in request"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_seat_list_rejected() {
        assert!(validate_seat_ids(&[]).is_err());
    }

    #[test]
    fn test_duplicate_seat_rejected() {
        let id = Uuid::new_v4();
        assert!(validate_seat_ids(&[id, id]).is_err());
        assert!(validate_seat_ids(&[id, Uuid::new_v4()]).is_ok());
    }
}
