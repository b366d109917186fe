//! Promotion repository.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use cineseat_core::error::{AppError, ErrorKind};
use cineseat_core::result::AppResult;
use cineseat_entity::Promotion;

#[derive(Debug, Clone)]
pub struct PromotionRepository {
    pool: PgPool,
}

impl PromotionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a promotion by its code (case-insensitive).
    pub async fn find_by_code(&self, code: &str) -> AppResult<Option<Promotion>> {
        sqlx::query_as::<_, Promotion>("SELECT * FROM promotions WHERE UPPER(code) = UPPER($1)")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find promotion by code", e)
            })
    }

    /// Transaction-scoped variant of [`Self::find_by_code`].
    pub async fn find_by_code_tx(
        conn: &mut PgConnection,
        code: &str,
    ) -> AppResult<Option<Promotion>> {
        sqlx::query_as::<_, Promotion>("SELECT * FROM promotions WHERE UPPER(code) = UPPER($1)")
            .bind(code)
            .fetch_optional(conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find promotion by code", e)
            })
    }

    /// Bump a promotion's redemption counter.
    ///
    /// Runs after the booking commit as its own statement; a crash in
    /// between under-counts by one, which is accepted.
    pub async fn increment_usage(&self, id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE promotions SET used_count = used_count + 1, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to increment promotion usage", e)
        })?;
        Ok(())
    }

    /// Currently redeemable promotions, for the public listing.
    pub async fn list_active(&self, now: DateTime<Utc>) -> AppResult<Vec<Promotion>> {
        sqlx::query_as::<_, Promotion>(
            "SELECT * FROM promotions \
             WHERE is_active \
             AND (start_date IS NULL OR start_date <= $1) \
             AND (end_date IS NULL OR end_date >= $1) \
             AND (usage_limit IS NULL OR used_count < usage_limit) \
             ORDER BY created_at DESC",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list active promotions", e)
        })
    }
}
