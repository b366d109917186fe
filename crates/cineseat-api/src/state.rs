//! Shared application state threaded through every handler.

use std::sync::Arc;

use cineseat_core::config::AppConfig;
use cineseat_database::DatabasePool;
use cineseat_lockstore::RedisClient;
use cineseat_realtime::ShowtimeGateway;
use cineseat_service::{
    BookingService, CheckinService, PromotionService, SeatHoldService,
};

/// Everything handlers need, assembled once in `run_server`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabasePool,
    pub lock_client: RedisClient,
    pub gateway: Arc<ShowtimeGateway>,
    pub seat_service: SeatHoldService,
    pub booking_service: BookingService,
    pub checkin_service: CheckinService,
    pub promotion_service: PromotionService,
}
