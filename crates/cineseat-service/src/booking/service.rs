//! Booking orchestration.
//!
//! `create_booking` is the heart of the engine: a cheap hold check in
//! front of one transaction that re-verifies availability against the
//! bookings table, prices the seats, applies the promotion, and inserts
//! every row. Any failure before commit rolls the whole purchase back.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use cineseat_core::error::AppError;
use cineseat_core::events::BookingEvent;
use cineseat_core::events::SeatEvent;
use cineseat_core::result::AppResult;
use cineseat_core::traits::ShowtimeBroadcast;
use cineseat_core::types::pagination::{PageRequest, PageResponse};
use cineseat_database::repositories::{BookingRepository, PromotionRepository, ShowtimeRepository};
use cineseat_entity::{
    Booking, BookingStatus, NewBooking, NewSeatBooking, SeatBooking, ticket_code,
};
use cineseat_lockstore::SeatLockManager;

use crate::context::RequestContext;

use super::pricing;

/// Input for creating a booking.
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub showtime_id: Uuid,
    pub seat_ids: Vec<Uuid>,
    pub promotion_code: Option<String>,
}

/// Input for confirming a booking after payment.
#[derive(Debug, Clone)]
pub struct ConfirmBooking {
    pub payment_method: String,
    pub transaction_reference: Option<String>,
}

/// A booking with its seat lines.
#[derive(Debug, Clone, Serialize)]
pub struct BookingDetail {
    pub booking: Booking,
    pub seats: Vec<SeatBooking>,
}

#[derive(Clone)]
pub struct BookingService {
    bookings: BookingRepository,
    promotions: PromotionRepository,
    lock_manager: Arc<SeatLockManager>,
    broadcast: Arc<dyn ShowtimeBroadcast>,
}

impl BookingService {
    pub fn new(
        bookings: BookingRepository,
        promotions: PromotionRepository,
        lock_manager: Arc<SeatLockManager>,
        broadcast: Arc<dyn ShowtimeBroadcast>,
    ) -> Self {
        Self {
            bookings,
            promotions,
            lock_manager,
            broadcast,
        }
    }

    /// Create a PENDING booking over held seats.
    pub async fn create_booking(
        &self,
        ctx: &RequestContext,
        input: CreateBooking,
    ) -> AppResult<BookingDetail> {
        if input.seat_ids.is_empty() {
            return Err(AppError::validation("seat_ids must not be empty"));
        }

        // Cheap pre-transaction guard: every seat must be held by the
        // caller. Catches expired holds before any database work.
        for &seat_id in &input.seat_ids {
            match self.lock_manager.holder_of(input.showtime_id, seat_id).await? {
                Some(holder) if holder == ctx.user_id => {}
                Some(_) => {
                    return Err(AppError::conflict(format!(
                        "seat {seat_id} is held by another user"
                    )));
                }
                None => {
                    return Err(AppError::conflict(format!(
                        "hold on seat {seat_id} has expired, please reselect"
                    )));
                }
            }
        }

        let mut tx = self.bookings.begin().await?;

        let showtime = ShowtimeRepository::find_by_id_tx(&mut *tx, input.showtime_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("showtime {} not found", input.showtime_id)))?;

        let seats = ShowtimeRepository::find_seats_tx(&mut *tx, &input.seat_ids).await?;
        if seats.len() != input.seat_ids.len() {
            return Err(AppError::validation(
                "request contains unknown or inactive seats",
            ));
        }

        // Authoritative double-sell guard, inside the same transaction
        // as the inserts.
        let conflicts =
            BookingRepository::conflicting_seat_ids_tx(&mut *tx, input.showtime_id, &input.seat_ids)
                .await?;
        if !conflicts.is_empty() {
            let listed = conflicts
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(AppError::conflict(format!("seats already booked: {listed}")));
        }

        let subtotal: f64 = seats
            .iter()
            .map(|s| s.seat_type.price(showtime.price))
            .sum();

        // Promotion application is all-or-nothing: any failing rule
        // rejects the purchase rather than silently skipping the code.
        let mut promotion = None;
        let mut discount_amount = 0.0;
        if let Some(code) = &input.promotion_code {
            let promo = PromotionRepository::find_by_code_tx(&mut *tx, code)
                .await?
                .ok_or_else(|| AppError::validation(format!("invalid promotion code {code}")))?;
            promo.validate(subtotal, seats.len(), Utc::now())?;
            discount_amount = promo.discount_for(subtotal);
            promotion = Some(promo);
        }

        let quote = pricing::quote(&showtime, &seats, discount_amount);

        let booking = BookingRepository::insert_tx(
            &mut *tx,
            &NewBooking {
                user_id: ctx.user_id,
                showtime_id: input.showtime_id,
                total_amount: quote.total_amount,
                discount_amount: quote.discount_amount,
                final_amount: quote.final_amount,
                promotion_code: promotion.as_ref().map(|p| p.code.clone()),
                status: BookingStatus::Pending,
            },
        )
        .await?;

        let mut lines = Vec::with_capacity(quote.seats.len());
        for priced in &quote.seats {
            let line = BookingRepository::insert_seat_tx(
                &mut *tx,
                &NewSeatBooking {
                    booking_id: booking.id,
                    seat_id: priced.seat_id,
                    showtime_id: input.showtime_id,
                    price: priced.final_price,
                },
            )
            .await?;
            lines.push(line);
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(
                cineseat_core::error::ErrorKind::Database,
                "Failed to commit booking",
                e,
            )
        })?;

        // Post-commit counter bump; a crash here under-counts by one,
        // which is accepted.
        if let Some(promo) = &promotion {
            if let Err(e) = self.promotions.increment_usage(promo.id).await {
                warn!(promotion_id = %promo.id, error = %e, "Failed to increment promotion usage");
            }
        }

        info!(
            booking_id = %booking.id,
            user_id = %ctx.user_id,
            showtime_id = %input.showtime_id,
            seats = lines.len(),
            final_amount = booking.final_amount,
            "Booking created"
        );

        self.broadcast
            .booking_update(BookingEvent::BookingCreated {
                booking_id: booking.id,
                showtime_id: input.showtime_id,
                seat_ids: input.seat_ids.clone(),
                holder_id: ctx.user_id,
            })
            .await;

        Ok(BookingDetail {
            booking,
            seats: lines,
        })
    }

    /// Confirm a PENDING booking after payment: assign ticket codes,
    /// drop the holds, and announce the permanent sale.
    pub async fn confirm_booking(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
        input: ConfirmBooking,
    ) -> AppResult<BookingDetail> {
        let booking = self
            .bookings
            .find_for_user(booking_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("booking {booking_id} not found")))?;

        if !booking.status.can_confirm() {
            return Err(AppError::invalid_state(format!(
                "cannot confirm booking in status {}",
                booking.status
            )));
        }

        let lines = self.bookings.seat_lines(booking_id).await?;

        let mut tx = self.bookings.begin().await?;
        // The UPDATE carries its own PENDING guard; a concurrent
        // confirmation of the same booking loses here.
        let booking = BookingRepository::confirm_tx(
            &mut *tx,
            booking_id,
            &input.payment_method,
            input.transaction_reference.as_deref(),
        )
        .await?
        .ok_or_else(|| {
            AppError::invalid_state(format!("booking {booking_id} is no longer pending"))
        })?;
        for line in &lines {
            BookingRepository::set_ticket_code_tx(
                &mut *tx,
                line.id,
                &ticket_code(booking_id, line.seat_id),
            )
            .await?;
        }
        tx.commit().await.map_err(|e| {
            AppError::with_source(
                cineseat_core::error::ErrorKind::Database,
                "Failed to commit confirmation",
                e,
            )
        })?;

        let seat_ids: Vec<Uuid> = lines.iter().map(|l| l.seat_id).collect();

        // The sale is committed; a lock-store failure here only delays
        // hold cleanup until the TTL fires.
        if let Err(e) = self
            .lock_manager
            .clear_seats(booking.showtime_id, &seat_ids)
            .await
        {
            warn!(booking_id = %booking_id, error = %e, "Failed to clear holds after confirmation");
        }

        info!(booking_id = %booking_id, user_id = %ctx.user_id, "Booking confirmed");

        self.broadcast
            .booking_update(BookingEvent::SeatsBooked {
                booking_id,
                showtime_id: booking.showtime_id,
                seat_ids,
            })
            .await;

        let seats = self.bookings.seat_lines(booking_id).await?;
        Ok(BookingDetail { booking, seats })
    }

    /// Cancel a booking and free its seats.
    pub async fn cancel_booking(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
    ) -> AppResult<BookingDetail> {
        let booking = self
            .bookings
            .find_for_user(booking_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("booking {booking_id} not found")))?;

        if !booking.status.can_cancel() {
            return Err(AppError::invalid_state(format!(
                "booking {booking_id} is already cancelled"
            )));
        }

        let booking = self.bookings.cancel(booking_id).await?;
        let seats = self.bookings.seat_lines(booking_id).await?;
        let seat_ids: Vec<Uuid> = seats.iter().map(|l| l.seat_id).collect();

        if let Err(e) = self
            .lock_manager
            .clear_seats(booking.showtime_id, &seat_ids)
            .await
        {
            warn!(booking_id = %booking_id, error = %e, "Failed to clear holds after cancellation");
        }

        info!(booking_id = %booking_id, user_id = %ctx.user_id, "Booking cancelled");

        self.broadcast
            .booking_update(BookingEvent::BookingCancelled {
                booking_id,
                showtime_id: booking.showtime_id,
                seat_ids: seat_ids.clone(),
            })
            .await;
        // Viewers also get per-seat unlock updates so seat maps recover
        // without reloading.
        for seat_id in seat_ids {
            self.broadcast
                .seat_update(SeatEvent::SeatUnlocked {
                    showtime_id: booking.showtime_id,
                    seat_id,
                    holder_id: ctx.user_id,
                })
                .await;
        }

        Ok(BookingDetail { booking, seats })
    }

    /// A booking with its tickets, owner-scoped.
    pub async fn get_booking(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
    ) -> AppResult<BookingDetail> {
        let booking = self
            .bookings
            .find_for_user(booking_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("booking {booking_id} not found")))?;
        let seats = self.bookings.seat_lines(booking_id).await?;
        Ok(BookingDetail { booking, seats })
    }

    /// The caller's booking history.
    pub async fn list_user_bookings(
        &self,
        ctx: &RequestContext,
        status: Option<BookingStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        self.bookings.list_for_user(ctx.user_id, status, page).await
    }

    /// Permanently sold seats of a showtime, for the public listing.
    pub async fn booked_seat_ids(&self, showtime_id: Uuid) -> AppResult<Vec<Uuid>> {
        self.bookings.booked_seat_ids(showtime_id).await
    }
}
