//! Ticket check-in: single and bulk redemption.

use std::collections::HashMap;

use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use cineseat_core::config::booking::BookingConfig;
use cineseat_core::error::AppError;
use cineseat_core::result::AppResult;
use cineseat_database::repositories::{BookingRepository, ShowtimeRepository};
use cineseat_entity::SeatBooking;

use crate::context::RequestContext;

use super::window::{self, WindowCheck};

/// One redeemed ticket.
#[derive(Debug, Clone, Serialize)]
pub struct RedeemedTicket {
    /// The seat line (the canonical ticket identifier).
    pub ticket_id: Uuid,
    pub seat_id: Uuid,
    /// Seat label, e.g. `A12`.
    pub seat_label: String,
    pub ticket_code: Option<String>,
}

/// Outcome of a check-in request.
#[derive(Debug, Clone, Serialize)]
pub struct CheckinResult {
    pub booking_id: Uuid,
    pub redeemed: Vec<RedeemedTicket>,
    pub redeemed_count: usize,
    /// Tickets skipped because they were already used (bulk mode only).
    pub already_used_count: usize,
    pub total_tickets: usize,
}

#[derive(Clone)]
pub struct CheckinService {
    bookings: BookingRepository,
    showtimes: ShowtimeRepository,
    /// Minutes before start_time at which the window opens.
    open_minutes_before: i64,
}

impl CheckinService {
    pub fn new(
        bookings: BookingRepository,
        showtimes: ShowtimeRepository,
        config: &BookingConfig,
    ) -> Self {
        Self {
            bookings,
            showtimes,
            open_minutes_before: config.checkin_open_minutes_before,
        }
    }

    /// Redeem tickets of a CONFIRMED booking inside the showtime's
    /// redemption window.
    ///
    /// With `ticket_id` present, exactly that ticket is redeemed and an
    /// already-used ticket is a hard failure. Without it, every unused
    /// ticket of the booking is redeemed and used ones are skipped and
    /// counted.
    pub async fn checkin(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
        ticket_id: Option<Uuid>,
    ) -> AppResult<CheckinResult> {
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("booking {booking_id} not found")))?;

        if !matches!(booking.status, cineseat_entity::BookingStatus::Confirmed) {
            return Err(AppError::invalid_state(format!(
                "cannot check in booking in status {}",
                booking.status
            )));
        }

        let showtime = self
            .showtimes
            .find_by_id(booking.showtime_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("showtime {} not found", booking.showtime_id))
            })?;

        match window::classify(
            showtime.start_time,
            showtime.end_time,
            self.open_minutes_before,
            Utc::now(),
        ) {
            WindowCheck::TooEarly => {
                return Err(AppError::invalid_state(format!(
                    "check-in opens {} minutes before the showtime starts",
                    self.open_minutes_before
                )));
            }
            WindowCheck::TooLate => {
                return Err(AppError::invalid_state(
                    "the showtime has ended, tickets can no longer be redeemed",
                ));
            }
            WindowCheck::Open => {}
        }

        let lines = self.bookings.seat_lines(booking_id).await?;
        let total_tickets = lines.len();
        let labels = self.seat_labels(&lines).await?;

        let mut redeemed = Vec::new();
        let mut already_used_count = 0;

        // Redemption is all-or-nothing: every mark runs on one
        // transaction, so a failure part-way leaves no ticket used.
        let mut tx = self.bookings.begin().await?;
        match ticket_id {
            Some(ticket_id) => {
                let line = lines
                    .iter()
                    .find(|l| l.id == ticket_id)
                    .ok_or_else(|| {
                        AppError::not_found(format!(
                            "ticket {ticket_id} does not belong to booking {booking_id}"
                        ))
                    })?;
                if line.is_used {
                    return Err(AppError::invalid_state(format!(
                        "ticket {ticket_id} has already been used"
                    )));
                }
                BookingRepository::mark_used_tx(&mut *tx, line.id).await?;
                redeemed.push(to_redeemed(line, &labels));
            }
            None => {
                for line in &lines {
                    if line.is_used {
                        already_used_count += 1;
                        continue;
                    }
                    BookingRepository::mark_used_tx(&mut *tx, line.id).await?;
                    redeemed.push(to_redeemed(line, &labels));
                }
            }
        }
        tx.commit().await.map_err(|e| {
            AppError::with_source(
                cineseat_core::error::ErrorKind::Database,
                "Failed to commit check-in",
                e,
            )
        })?;

        info!(
            booking_id = %booking_id,
            caller = %ctx.user_id,
            redeemed = redeemed.len(),
            already_used = already_used_count,
            "Check-in processed"
        );

        Ok(CheckinResult {
            booking_id,
            redeemed_count: redeemed.len(),
            redeemed,
            already_used_count,
            total_tickets,
        })
    }

    async fn seat_labels(&self, lines: &[SeatBooking]) -> AppResult<HashMap<Uuid, String>> {
        let seat_ids: Vec<Uuid> = lines.iter().map(|l| l.seat_id).collect();
        let seats = self.showtimes.find_seats(&seat_ids).await?;
        Ok(seats.into_iter().map(|s| (s.id, s.label())).collect())
    }
}

fn to_redeemed(line: &SeatBooking, labels: &HashMap<Uuid, String>) -> RedeemedTicket {
    RedeemedTicket {
        ticket_id: line.id,
        seat_id: line.seat_id,
        seat_label: labels.get(&line.seat_id).cloned().unwrap_or_default(),
        ticket_code: line.ticket_code.clone(),
    }
}
