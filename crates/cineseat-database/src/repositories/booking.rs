//! Booking repository.
//!
//! The create and confirm flows run inside explicit transactions opened
//! with [`BookingRepository::begin`]; the `_tx` methods take the
//! transaction's connection so all writes of one purchase commit or roll
//! back together.

use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use uuid::Uuid;

use cineseat_core::error::{AppError, ErrorKind};
use cineseat_core::result::AppResult;
use cineseat_core::types::pagination::{PageRequest, PageResponse};
use cineseat_entity::{Booking, BookingStatus, NewBooking, NewSeatBooking, SeatBooking};

#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a transaction for a multi-step booking flow.
    pub async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })
    }

    /// Seats among `seat_ids` already sold for this showtime.
    ///
    /// A seat is sold when a seat line exists under a booking whose
    /// status still blocks the seats (PENDING or CONFIRMED). Running
    /// this inside the insert transaction makes it the authoritative
    /// double-sell guard.
    pub async fn conflicting_seat_ids_tx(
        conn: &mut PgConnection,
        showtime_id: Uuid,
        seat_ids: &[Uuid],
    ) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT sb.seat_id FROM seat_bookings sb \
             JOIN bookings b ON b.id = sb.booking_id \
             WHERE sb.showtime_id = $1 AND sb.seat_id = ANY($2) \
             AND b.status IN ('PENDING', 'CONFIRMED')",
        )
        .bind(showtime_id)
        .bind(seat_ids)
        .fetch_all(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check seat conflicts", e)
        })
    }

    /// Insert the booking row.
    pub async fn insert_tx(conn: &mut PgConnection, new: &NewBooking) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings \
             (user_id, showtime_id, total_amount, discount_amount, final_amount, \
              promotion_code, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(new.user_id)
        .bind(new.showtime_id)
        .bind(new.total_amount)
        .bind(new.discount_amount)
        .bind(new.final_amount)
        .bind(&new.promotion_code)
        .bind(new.status)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert booking", e))
    }

    /// Insert one seat line.
    pub async fn insert_seat_tx(
        conn: &mut PgConnection,
        new: &NewSeatBooking,
    ) -> AppResult<SeatBooking> {
        sqlx::query_as::<_, SeatBooking>(
            "INSERT INTO seat_bookings (booking_id, seat_id, showtime_id, price) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(new.booking_id)
        .bind(new.seat_id)
        .bind(new.showtime_id)
        .bind(new.price)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert seat booking", e))
    }

    /// Find a booking by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find booking by id", e)
            })
    }

    /// Find a booking owned by the given user.
    pub async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find booking for user", e)
            })
    }

    /// All seat lines of a booking, in seat insertion order.
    pub async fn seat_lines(&self, booking_id: Uuid) -> AppResult<Vec<SeatBooking>> {
        sqlx::query_as::<_, SeatBooking>(
            "SELECT * FROM seat_bookings WHERE booking_id = $1 ORDER BY created_at",
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load seat lines", e))
    }

    /// One seat line of a booking.
    pub async fn find_seat_line(
        &self,
        booking_id: Uuid,
        seat_booking_id: Uuid,
    ) -> AppResult<Option<SeatBooking>> {
        sqlx::query_as::<_, SeatBooking>(
            "SELECT * FROM seat_bookings WHERE id = $1 AND booking_id = $2",
        )
        .bind(seat_booking_id)
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find seat line", e))
    }

    /// Move a PENDING booking to CONFIRMED with its payment details.
    ///
    /// The status guard is part of the UPDATE itself, so two concurrent
    /// confirmations cannot both succeed; `None` means the booking was
    /// not PENDING anymore.
    pub async fn confirm_tx(
        conn: &mut PgConnection,
        booking_id: Uuid,
        payment_method: &str,
        transaction_reference: Option<&str>,
    ) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = 'CONFIRMED', payment_method = $2, \
             transaction_reference = $3, updated_at = NOW() \
             WHERE id = $1 AND status = 'PENDING' RETURNING *",
        )
        .bind(booking_id)
        .bind(payment_method)
        .bind(transaction_reference)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to confirm booking", e))
    }

    /// Assign the ticket code of one seat line at confirmation.
    pub async fn set_ticket_code_tx(
        conn: &mut PgConnection,
        seat_booking_id: Uuid,
        ticket_code: &str,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE seat_bookings SET ticket_code = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(seat_booking_id)
        .bind(ticket_code)
        .execute(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set ticket code", e))?;
        Ok(())
    }

    /// Move a booking to CANCELLED.
    pub async fn cancel(&self, booking_id: Uuid) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = 'CANCELLED', updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(booking_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to cancel booking", e))
    }

    /// Mark one ticket as used. The flag is one-way.
    ///
    /// Runs on a transaction connection so a bulk redemption commits or
    /// rolls back as a whole.
    pub async fn mark_used_tx(conn: &mut PgConnection, seat_booking_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE seat_bookings SET is_used = TRUE, updated_at = NOW() WHERE id = $1")
            .bind(seat_booking_id)
            .execute(conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to mark ticket used", e)
            })?;
        Ok(())
    }

    /// Permanently sold seat ids of a showtime, for the public listing.
    pub async fn booked_seat_ids(&self, showtime_id: Uuid) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT sb.seat_id FROM seat_bookings sb \
             JOIN bookings b ON b.id = sb.booking_id \
             WHERE sb.showtime_id = $1 AND b.status IN ('PENDING', 'CONFIRMED')",
        )
        .bind(showtime_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list booked seats", e)
        })
    }

    /// A user's booking history, newest first, optionally filtered by
    /// status.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        status: Option<BookingStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings WHERE user_id = $1 AND ($2::booking_status IS NULL OR status = $2)",
        )
        .bind(user_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count bookings", e))?;

        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings \
             WHERE user_id = $1 AND ($2::booking_status IS NULL OR status = $2) \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(user_id)
        .bind(status)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bookings", e))?;

        Ok(PageResponse::new(
            bookings,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
