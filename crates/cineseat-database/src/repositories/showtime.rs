//! Showtime and seat read-side repository.
//!
//! Showtimes and seats are reference data owned by the catalog service;
//! this repository only reads them.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use cineseat_core::error::{AppError, ErrorKind};
use cineseat_core::result::AppResult;
use cineseat_entity::{Seat, Showtime};

#[derive(Debug, Clone)]
pub struct ShowtimeRepository {
    pool: PgPool,
}

impl ShowtimeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a showtime by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Showtime>> {
        sqlx::query_as::<_, Showtime>("SELECT * FROM showtimes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find showtime by id", e)
            })
    }

    /// Transaction-scoped variant of [`Self::find_by_id`].
    pub async fn find_by_id_tx(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> AppResult<Option<Showtime>> {
        sqlx::query_as::<_, Showtime>("SELECT * FROM showtimes WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find showtime by id", e)
            })
    }

    /// Load the listed seats by id.
    pub async fn find_seats(&self, seat_ids: &[Uuid]) -> AppResult<Vec<Seat>> {
        sqlx::query_as::<_, Seat>("SELECT * FROM seats WHERE id = ANY($1)")
            .bind(seat_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load seats", e))
    }

    /// Load the listed active seats, in no particular order.
    ///
    /// Callers compare the result length against the request to detect
    /// unknown or inactive seat ids.
    pub async fn find_seats_tx(
        conn: &mut PgConnection,
        seat_ids: &[Uuid],
    ) -> AppResult<Vec<Seat>> {
        sqlx::query_as::<_, Seat>("SELECT * FROM seats WHERE id = ANY($1) AND is_active")
            .bind(seat_ids)
            .fetch_all(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load seats", e))
    }
}
