//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use cineseat_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP-facing wrapper around the domain [`AppError`].
///
/// Handlers return `Result<_, ApiError>` so the `?` operator converts
/// domain errors at the boundary.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code, message) = match &err.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.message.clone()),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", err.message.clone()),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT", err.message.clone()),
            ErrorKind::InvalidState => (StatusCode::CONFLICT, "INVALID_STATE", err.message.clone()),
            ErrorKind::ServiceUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                err.message.clone(),
            ),
            // Infrastructure details are logged, never leaked to clients.
            ErrorKind::Database
            | ErrorKind::LockStore
            | ErrorKind::Serialization
            | ErrorKind::Configuration
            | ErrorKind::Internal => {
                tracing::error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "internal server error".to_string(),
                )
            }
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn respond(err: AppError) -> Response {
        ApiError::from(err).into_response()
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let resp = respond(AppError::conflict("seat taken"));
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_invalid_state_maps_to_409() {
        let resp = respond(AppError::invalid_state("already cancelled"));
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_infrastructure_errors_are_opaque() {
        let resp = respond(AppError::database("connection refused to 10.0.0.5"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
