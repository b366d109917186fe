//! Showtime gateway: connection registry, room membership, and fan-out.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, info};
use uuid::Uuid;

use cineseat_core::events::{BookingEvent, SeatEvent};
use cineseat_core::result::AppResult;
use cineseat_core::traits::ShowtimeBroadcast;
use cineseat_lockstore::SeatLockManager;

use crate::connection::handle::{ConnectionHandle, ConnectionId};
use crate::message::types::OutboundMessage;
use crate::rooms::ShowtimeRooms;

/// Fan-out hub for all WebSocket clients.
///
/// One instance per process; services broadcast through the
/// [`ShowtimeBroadcast`] impl and the event relay feeds it events from
/// other instances via Redis pub/sub.
pub struct ShowtimeGateway {
    /// All live connections.
    connections: DashMap<ConnectionId, Arc<ConnectionHandle>>,
    /// Room membership.
    rooms: ShowtimeRooms,
    /// For the snapshot sent to a joining connection.
    lock_manager: Arc<SeatLockManager>,
}

impl ShowtimeGateway {
    pub fn new(lock_manager: Arc<SeatLockManager>) -> Self {
        Self {
            connections: DashMap::new(),
            rooms: ShowtimeRooms::new(),
            lock_manager,
        }
    }

    /// Register a new connection.
    pub fn register(&self, handle: Arc<ConnectionHandle>) -> ConnectionId {
        let id = handle.id;
        self.connections.insert(id, handle);
        info!(connection_id = %id, total = self.connections.len(), "Connection registered");
        id
    }

    /// Drop a connection and its room memberships.
    ///
    /// Holds owned by the user behind this connection are left alone;
    /// the lock TTL reclaims them.
    pub fn unregister(&self, conn_id: ConnectionId) {
        self.rooms.leave_all(conn_id);
        if let Some((_, handle)) = self.connections.remove(&conn_id) {
            handle.mark_dead();
        }
        info!(connection_id = %conn_id, total = self.connections.len(), "Connection unregistered");
    }

    /// Join a showtime room and send the joiner its private snapshot of
    /// current holds.
    pub async fn join(&self, conn_id: ConnectionId, showtime_id: Uuid) -> AppResult<()> {
        self.rooms.join(showtime_id, conn_id);
        debug!(connection_id = %conn_id, %showtime_id, "Joined showtime room");

        if let Some(handle) = self.handle_of(conn_id) {
            handle.send(OutboundMessage::Joined { showtime_id }).await;
            let holds = self.lock_manager.snapshot(showtime_id).await?;
            handle
                .send(OutboundMessage::Snapshot { showtime_id, holds })
                .await;
        }
        Ok(())
    }

    /// Leave a showtime room.
    pub async fn leave(&self, conn_id: ConnectionId, showtime_id: Uuid) {
        self.rooms.leave(showtime_id, conn_id);
        debug!(connection_id = %conn_id, %showtime_id, "Left showtime room");
        if let Some(handle) = self.handle_of(conn_id) {
            handle.send(OutboundMessage::Left { showtime_id }).await;
        }
    }

    /// Send an error to one connection.
    pub async fn send_error(&self, conn_id: ConnectionId, message: impl Into<String>) {
        if let Some(handle) = self.handle_of(conn_id) {
            handle
                .send(OutboundMessage::Error {
                    message: message.into(),
                })
                .await;
        }
    }

    /// Broadcast a message to every member of a showtime room.
    pub async fn broadcast(&self, showtime_id: Uuid, msg: OutboundMessage) {
        for conn_id in self.rooms.members(showtime_id) {
            if let Some(handle) = self.handle_of(conn_id) {
                handle.send(msg.clone()).await;
            }
        }
    }

    /// Clone a connection's handle out of the registry so the map guard
    /// is never held across a send.
    fn handle_of(&self, conn_id: ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.connections.get(&conn_id).map(|h| h.clone())
    }

    /// Number of live connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

#[async_trait]
impl ShowtimeBroadcast for ShowtimeGateway {
    async fn seat_update(&self, event: SeatEvent) {
        let showtime_id = event.showtime_id();
        self.broadcast(showtime_id, OutboundMessage::Update { event })
            .await;
    }

    async fn booking_update(&self, event: BookingEvent) {
        let showtime_id = event.showtime_id();
        let msg = match event {
            BookingEvent::BookingCreated {
                booking_id,
                showtime_id,
                seat_ids,
                holder_id,
            } => OutboundMessage::BookingCreated {
                booking_id,
                showtime_id,
                seat_ids,
                holder_id,
            },
            BookingEvent::SeatsBooked {
                booking_id,
                showtime_id,
                seat_ids,
            } => OutboundMessage::Booked {
                booking_id,
                showtime_id,
                seat_ids,
            },
            BookingEvent::BookingCancelled {
                booking_id,
                showtime_id,
                seat_ids,
            } => OutboundMessage::BookingCancelled {
                booking_id,
                showtime_id,
                seat_ids,
            },
        };
        self.broadcast(showtime_id, msg).await;
    }
}
