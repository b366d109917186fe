//! Broadcast seam between the service layer and the realtime gateway.

use async_trait::async_trait;

use crate::events::{BookingEvent, SeatEvent};

/// Fan-out of seat and booking events to every viewer of a showtime.
///
/// Services receive this as an injected `Arc<dyn ShowtimeBroadcast>` so
/// business logic can be tested with a recording stub and so multiple
/// engine instances can coexist in one process. Delivery is best-effort;
/// implementations must not fail the calling operation.
#[async_trait]
pub trait ShowtimeBroadcast: Send + Sync {
    /// Broadcast a transient seat hold update to the showtime group.
    async fn seat_update(&self, event: SeatEvent);

    /// Broadcast a booking lifecycle event to the showtime group.
    async fn booking_update(&self, event: BookingEvent);
}
