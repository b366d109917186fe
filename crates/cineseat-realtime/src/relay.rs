//! Redis event relay.
//!
//! Bridges the lock store's pub/sub channels into the gateway so every
//! engine instance broadcasts all seat events, not only those it caused.
//! Requires `notify-keyspace-events Ex` on the Redis server for expiry
//! notifications.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tracing::{error, info, warn};

use cineseat_core::events::SeatEvent;
use cineseat_core::result::AppResult;
use cineseat_core::traits::ShowtimeBroadcast;
use cineseat_lockstore::keys::{self, SeatLockKey};
use cineseat_lockstore::RedisClient;

use crate::gateway::ShowtimeGateway;

/// Subscribes to seat event channels and key-expiry notifications and
/// forwards both into the gateway.
pub struct EventRelay {
    client: RedisClient,
    gateway: Arc<ShowtimeGateway>,
    reconnect_delay: Duration,
}

impl EventRelay {
    pub fn new(
        client: RedisClient,
        gateway: Arc<ShowtimeGateway>,
        reconnect_delay_seconds: u64,
    ) -> Self {
        Self {
            client,
            gateway,
            reconnect_delay: Duration::from_secs(reconnect_delay_seconds),
        }
    }

    /// Spawn both subscriber tasks. They run for the process lifetime,
    /// reconnecting after any connection loss.
    pub fn spawn(self) {
        let relay = Arc::new(self);

        let events = relay.clone();
        tokio::spawn(async move {
            loop {
                if let Err(e) = events.run_seat_events().await {
                    error!(error = %e, "Seat event subscriber failed, reconnecting");
                }
                tokio::time::sleep(events.reconnect_delay).await;
            }
        });

        let expiry = relay;
        tokio::spawn(async move {
            loop {
                if let Err(e) = expiry.run_expiry_events().await {
                    error!(error = %e, "Expiry subscriber failed, reconnecting");
                }
                tokio::time::sleep(expiry.reconnect_delay).await;
            }
        });
    }

    /// Forward serialized seat events published by any instance's lock
    /// manager.
    async fn run_seat_events(&self) -> AppResult<()> {
        let pattern = keys::seat_events_pattern(self.client.prefix());
        let mut pubsub = self.client.pubsub().await?;
        pubsub.psubscribe(&pattern).await.map_err(|e| {
            cineseat_core::AppError::with_source(
                cineseat_core::error::ErrorKind::LockStore,
                format!("Failed to psubscribe to {pattern}"),
                e,
            )
        })?;
        info!(pattern, "Subscribed to seat events");

        let mut stream = pubsub.on_message();
        while let Some(msg) = stream.next().await {
            let payload: String = match msg.get_payload() {
                Ok(p) => p,
                Err(e) => {
                    warn!(error = %e, "Dropping unreadable seat event payload");
                    continue;
                }
            };
            match serde_json::from_str::<SeatEvent>(&payload) {
                Ok(event) => self.gateway.seat_update(event).await,
                Err(e) => warn!(error = %e, payload, "Dropping malformed seat event"),
            }
        }

        Err(cineseat_core::AppError::lock_store(
            "Seat event subscription closed",
        ))
    }

    /// Synthesize expiry events from key-expiry notifications. Only the
    /// key name is available, so it is decoded back into its parts;
    /// foreign keys are ignored.
    async fn run_expiry_events(&self) -> AppResult<()> {
        let mut pubsub = self.client.pubsub().await?;
        pubsub
            .psubscribe(keys::EXPIRED_EVENTS_PATTERN)
            .await
            .map_err(|e| {
                cineseat_core::AppError::with_source(
                    cineseat_core::error::ErrorKind::LockStore,
                    "Failed to psubscribe to expiry notifications",
                    e,
                )
            })?;
        info!(pattern = keys::EXPIRED_EVENTS_PATTERN, "Subscribed to key expiry");

        let mut stream = pubsub.on_message();
        while let Some(msg) = stream.next().await {
            let key: String = match msg.get_payload() {
                Ok(k) => k,
                Err(e) => {
                    warn!(error = %e, "Dropping unreadable expiry notification");
                    continue;
                }
            };
            if let Some(lock) = SeatLockKey::decode(self.client.prefix(), &key) {
                self.gateway
                    .seat_update(SeatEvent::SeatExpired {
                        showtime_id: lock.showtime_id,
                        seat_id: lock.seat_id,
                    })
                    .await;
            }
        }

        Err(cineseat_core::AppError::lock_store(
            "Expiry subscription closed",
        ))
    }
}
