//! Server bootstrap — wires stores, services, gateway, and router.

use std::sync::Arc;

use cineseat_core::config::AppConfig;
use cineseat_core::error::AppError;
use cineseat_core::traits::ShowtimeBroadcast;
use cineseat_database::DatabasePool;
use cineseat_database::migration::run_migrations;
use cineseat_database::repositories::{
    BookingRepository, PromotionRepository, ShowtimeRepository,
};
use cineseat_lockstore::{RedisClient, SeatLockManager};
use cineseat_realtime::{EventRelay, ShowtimeGateway};
use cineseat_service::{
    BookingService, CheckinService, PromotionService, SeatHoldService,
};

use crate::router::build_router;
use crate::state::AppState;

/// Runs the CineSeat server with the given configuration.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting CineSeat server...");

    // ── Step 1: Connect to PostgreSQL and migrate ────────────────
    let db = DatabasePool::connect(&config.database).await?;
    run_migrations(db.pool()).await?;

    // ── Step 2: Connect to Redis ─────────────────────────────────
    let lock_client = RedisClient::connect(&config.lockstore).await?;
    let lock_manager = Arc::new(SeatLockManager::new(
        lock_client.clone(),
        config.lockstore.hold_ttl_seconds,
    ));

    // ── Step 3: Realtime gateway and event relay ─────────────────
    let gateway = Arc::new(ShowtimeGateway::new(Arc::clone(&lock_manager)));
    EventRelay::new(
        lock_client.clone(),
        Arc::clone(&gateway),
        config.realtime.relay_reconnect_delay_seconds,
    )
    .spawn();

    // ── Step 4: Repositories ─────────────────────────────────────
    let showtime_repo = ShowtimeRepository::new(db.pool().clone());
    let booking_repo = BookingRepository::new(db.pool().clone());
    let promotion_repo = PromotionRepository::new(db.pool().clone());

    // ── Step 5: Services ─────────────────────────────────────────
    let broadcast: Arc<dyn ShowtimeBroadcast> = gateway.clone();
    let seat_service = SeatHoldService::new(Arc::clone(&lock_manager));
    let booking_service = BookingService::new(
        booking_repo.clone(),
        promotion_repo.clone(),
        Arc::clone(&lock_manager),
        Arc::clone(&broadcast),
    );
    let checkin_service = CheckinService::new(booking_repo, showtime_repo, &config.booking);
    let promotion_service = PromotionService::new(promotion_repo);

    // ── Step 6: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        config: Arc::new(config),
        db,
        lock_client,
        gateway,
        seat_service,
        booking_service,
        checkin_service,
        promotion_service,
    };

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("CineSeat server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
    }
}
