//! Route definitions for the CineSeat HTTP API.
//!
//! All REST routes are organized by domain and mounted under `/api`;
//! the WebSocket upgrade lives at the root.

use axum::http::HeaderValue;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(seat_routes())
        .merge(booking_routes())
        .merge(promotion_routes())
        .merge(health_routes());

    let ws_routes = Router::new().route("/ws", get(handlers::ws::ws_upgrade));

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .merge(ws_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Seat holds and the public booked-seats listing.
fn seat_routes() -> Router<AppState> {
    Router::new()
        .route("/seats/hold", post(handlers::seat::hold_seats))
        .route("/seats/release", post(handlers::seat::release_seats))
        .route(
            "/showtimes/{id}/booked-seats",
            get(handlers::seat::booked_seats),
        )
}

/// Booking lifecycle and check-in.
fn booking_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/bookings",
            post(handlers::booking::create_booking).get(handlers::booking::list_bookings),
        )
        .route("/bookings/{id}", get(handlers::booking::get_booking))
        .route(
            "/bookings/{id}/confirm",
            post(handlers::booking::confirm_booking),
        )
        .route(
            "/bookings/{id}/cancel",
            post(handlers::booking::cancel_booking),
        )
        .route("/bookings/{id}/checkin", post(handlers::booking::checkin))
}

/// Promotion quote and listing.
fn promotion_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/promotions/validate",
            post(handlers::promotion::validate_promotion),
        )
        .route("/promotions/active", get(handlers::promotion::list_active))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Builds a CORS tower layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let origins = &state.config.server.cors_allowed_origins;
    if origins.contains(&"*".to_string()) {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(parsed)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
