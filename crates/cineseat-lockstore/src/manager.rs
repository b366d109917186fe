//! Seat lock acquisition, release, and inspection.

use redis::AsyncCommands;
use tracing::{debug, warn};
use uuid::Uuid;

use cineseat_core::error::{AppError, ErrorKind};
use cineseat_core::events::SeatEvent;
use cineseat_core::result::AppResult;

use crate::client::RedisClient;
use crate::keys::{self, SeatLockKey};
use crate::types::{HoldOutcome, SeatHold, SeatHoldFailure};

/// Manages per-seat distributed holds.
///
/// Each hold is one Redis key whose value is the holder's user id and
/// whose TTL bounds the hold's lifetime. `SET NX EX` linearizes
/// competing acquisitions; no two holders can own the same seat at once.
#[derive(Debug, Clone)]
pub struct SeatLockManager {
    client: RedisClient,
    /// Hold lifetime in seconds.
    hold_ttl: u64,
}

impl SeatLockManager {
    pub fn new(client: RedisClient, hold_ttl_seconds: u64) -> Self {
        Self {
            client,
            hold_ttl: hold_ttl_seconds,
        }
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::LockStore, format!("Redis error: {e}"), e)
    }

    /// Try to hold every seat in the list for `holder_id`.
    ///
    /// Each seat is attempted independently. A seat already held by the
    /// same user has its TTL refreshed and counts as held; a seat held by
    /// someone else becomes a per-seat failure. Newly acquired seats are
    /// announced on the showtime's event channel.
    pub async fn hold_seats(
        &self,
        showtime_id: Uuid,
        seat_ids: &[Uuid],
        holder_id: Uuid,
    ) -> AppResult<HoldOutcome> {
        let mut conn = self.client.conn_mut();
        let mut outcome = HoldOutcome::default();

        for &seat_id in seat_ids {
            let key = SeatLockKey::new(showtime_id, seat_id).encode(self.client.prefix());

            // SET key holder EX ttl NX
            let acquired: Option<String> = redis::cmd("SET")
                .arg(&key)
                .arg(holder_id.to_string())
                .arg("EX")
                .arg(self.hold_ttl)
                .arg("NX")
                .query_async(&mut conn)
                .await
                .map_err(Self::map_err)?;

            if acquired.is_some() {
                debug!(%showtime_id, %seat_id, %holder_id, "Seat held");
                outcome.held.push(seat_id);
                self.publish(
                    showtime_id,
                    &SeatEvent::SeatLocked {
                        showtime_id,
                        seat_id,
                        holder_id,
                    },
                )
                .await?;
                continue;
            }

            let current: Option<String> = conn.get(&key).await.map_err(Self::map_err)?;
            if current.as_deref() == Some(holder_id.to_string().as_str()) {
                // Same holder re-requesting: refresh the TTL instead of failing.
                let _: bool = conn
                    .expire(&key, self.hold_ttl as i64)
                    .await
                    .map_err(Self::map_err)?;
                debug!(%showtime_id, %seat_id, %holder_id, "Hold refreshed");
                outcome.held.push(seat_id);
            } else {
                outcome.failed.push(SeatHoldFailure {
                    seat_id,
                    reason: "seat is held by another user".to_string(),
                });
            }
        }

        Ok(outcome)
    }

    /// Release seats held by `holder_id`.
    ///
    /// Ownership is checked per seat: a seat held by someone else (or not
    /// held at all) is reported as a failure and left untouched.
    pub async fn release_seats(
        &self,
        showtime_id: Uuid,
        seat_ids: &[Uuid],
        holder_id: Uuid,
    ) -> AppResult<HoldOutcome> {
        let mut conn = self.client.conn_mut();
        let mut outcome = HoldOutcome::default();

        for &seat_id in seat_ids {
            let key = SeatLockKey::new(showtime_id, seat_id).encode(self.client.prefix());
            let current: Option<String> = conn.get(&key).await.map_err(Self::map_err)?;

            match current {
                Some(value) if value == holder_id.to_string() => {
                    let _: () = conn.del(&key).await.map_err(Self::map_err)?;
                    debug!(%showtime_id, %seat_id, %holder_id, "Seat released");
                    outcome.held.push(seat_id);
                    self.publish(
                        showtime_id,
                        &SeatEvent::SeatUnlocked {
                            showtime_id,
                            seat_id,
                            holder_id,
                        },
                    )
                    .await?;
                }
                Some(_) => {
                    outcome.failed.push(SeatHoldFailure {
                        seat_id,
                        reason: "seat is held by another user".to_string(),
                    });
                }
                None => {
                    outcome.failed.push(SeatHoldFailure {
                        seat_id,
                        reason: "seat is not held".to_string(),
                    });
                }
            }
        }

        Ok(outcome)
    }

    /// Current holder of a seat, if any.
    pub async fn holder_of(&self, showtime_id: Uuid, seat_id: Uuid) -> AppResult<Option<Uuid>> {
        let key = SeatLockKey::new(showtime_id, seat_id).encode(self.client.prefix());
        let mut conn = self.client.conn_mut();
        let value: Option<String> = conn.get(&key).await.map_err(Self::map_err)?;
        match value {
            Some(raw) => {
                let holder = raw.parse().map_err(|e| {
                    AppError::with_source(
                        ErrorKind::LockStore,
                        format!("Malformed holder id in lock key {key}"),
                        e,
                    )
                })?;
                Ok(Some(holder))
            }
            None => Ok(None),
        }
    }

    /// All live holds for a showtime with their remaining TTLs.
    ///
    /// Keys that expire between the scan and the per-key reads are
    /// skipped, so the snapshot never reports a dead hold.
    pub async fn snapshot(&self, showtime_id: Uuid) -> AppResult<Vec<SeatHold>> {
        let pattern = keys::showtime_locks_pattern(self.client.prefix(), showtime_id);
        let mut conn = self.client.conn_mut();

        let lock_keys: Vec<String> = redis::cmd("KEYS")
            .arg(&pattern)
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;

        let mut holds = Vec::with_capacity(lock_keys.len());
        for key in &lock_keys {
            let Some(decoded) = SeatLockKey::decode(self.client.prefix(), key) else {
                continue;
            };
            let value: Option<String> = conn.get(key).await.map_err(Self::map_err)?;
            let ttl: i64 = conn.ttl(key).await.map_err(Self::map_err)?;
            if ttl <= 0 {
                continue;
            }
            let Some(raw) = value else { continue };
            let Ok(holder_id) = raw.parse() else {
                warn!(key, "Skipping lock with malformed holder id");
                continue;
            };
            holds.push(SeatHold {
                seat_id: decoded.seat_id,
                holder_id,
                ttl_seconds: ttl,
            });
        }

        Ok(holds)
    }

    /// Drop holds unconditionally after a booking is confirmed or
    /// cancelled. No unlock events are published; the booking broadcast
    /// already tells clients what happened to the seats.
    pub async fn clear_seats(&self, showtime_id: Uuid, seat_ids: &[Uuid]) -> AppResult<()> {
        let mut conn = self.client.conn_mut();
        for &seat_id in seat_ids {
            let key = SeatLockKey::new(showtime_id, seat_id).encode(self.client.prefix());
            let _: () = conn.del(&key).await.map_err(Self::map_err)?;
        }
        debug!(%showtime_id, count = seat_ids.len(), "Cleared seat holds");
        Ok(())
    }

    async fn publish(&self, showtime_id: Uuid, event: &SeatEvent) -> AppResult<()> {
        let channel = keys::seat_events_channel(self.client.prefix(), showtime_id);
        let payload = serde_json::to_string(event)?;
        let mut conn = self.client.conn_mut();
        let _: () = conn
            .publish(&channel, payload)
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }
}
