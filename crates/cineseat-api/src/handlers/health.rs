//! Health probe.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health — pings both backing stores.
pub async fn health(State(state): State<AppState>) -> Response {
    let database = matches!(state.db.health_check().await, Ok(true));
    let lock_store = matches!(state.lock_client.health_check().await, Ok(true));

    let healthy = database && lock_store;
    let body = HealthResponse {
        status: if healthy { "ok" } else { "degraded" },
        database,
        lock_store,
    };
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body)).into_response()
}
