//! Showtime rooms — which connections watch which showtimes.

use std::collections::HashSet;

use dashmap::DashMap;
use uuid::Uuid;

use crate::connection::handle::ConnectionId;

/// Registry of showtime rooms with a reverse index per connection.
#[derive(Debug, Default)]
pub struct ShowtimeRooms {
    /// Showtime → member connections.
    rooms: DashMap<Uuid, HashSet<ConnectionId>>,
    /// Connection → joined showtimes.
    memberships: DashMap<ConnectionId, HashSet<Uuid>>,
}

impl ShowtimeRooms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to a showtime room. Idempotent.
    pub fn join(&self, showtime_id: Uuid, conn_id: ConnectionId) {
        self.rooms.entry(showtime_id).or_default().insert(conn_id);
        self.memberships
            .entry(conn_id)
            .or_default()
            .insert(showtime_id);
    }

    /// Remove a connection from a showtime room.
    pub fn leave(&self, showtime_id: Uuid, conn_id: ConnectionId) {
        if let Some(mut room) = self.rooms.get_mut(&showtime_id) {
            room.remove(&conn_id);
            if room.is_empty() {
                drop(room);
                self.rooms.remove(&showtime_id);
            }
        }
        if let Some(mut joined) = self.memberships.get_mut(&conn_id) {
            joined.remove(&showtime_id);
        }
    }

    /// Remove a connection from every room it joined.
    pub fn leave_all(&self, conn_id: ConnectionId) {
        let joined = self
            .memberships
            .remove(&conn_id)
            .map(|(_, set)| set)
            .unwrap_or_default();
        for showtime_id in &joined {
            if let Some(mut room) = self.rooms.get_mut(showtime_id) {
                room.remove(&conn_id);
                if room.is_empty() {
                    drop(room);
                    self.rooms.remove(showtime_id);
                }
            }
        }
    }

    /// Member connections of a showtime room.
    pub fn members(&self, showtime_id: Uuid) -> Vec<ConnectionId> {
        self.rooms
            .get(&showtime_id)
            .map(|room| room.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of active rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_leave() {
        let rooms = ShowtimeRooms::new();
        let showtime = Uuid::new_v4();
        let conn = Uuid::new_v4();

        rooms.join(showtime, conn);
        assert_eq!(rooms.members(showtime), vec![conn]);

        rooms.leave(showtime, conn);
        assert!(rooms.members(showtime).is_empty());
        // Empty rooms are dropped.
        assert_eq!(rooms.room_count(), 0);
    }

    #[test]
    fn test_leave_all_clears_every_room() {
        let rooms = ShowtimeRooms::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let conn = Uuid::new_v4();
        let other = Uuid::new_v4();

        rooms.join(a, conn);
        rooms.join(b, conn);
        rooms.join(a, other);
        rooms.leave_all(conn);

        assert_eq!(rooms.members(a), vec![other]);
        assert!(rooms.members(b).is_empty());
    }
}
