//! Promotion endpoints.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use cineseat_core::error::AppError;
use cineseat_entity::Promotion;
use cineseat_service::promotion::service::PromotionQuote;

use crate::dto::request::ValidatePromotionRequest;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/promotions/validate — pre-purchase discount quote.
pub async fn validate_promotion(
    State(state): State<AppState>,
    Json(req): Json<ValidatePromotionRequest>,
) -> Result<Json<PromotionQuote>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let quote = state
        .promotion_service
        .validate_code(&req.code, req.total_amount, req.ticket_count as usize)
        .await?;
    Ok(Json(quote))
}

/// GET /api/promotions/active — public active-promotion listing.
pub async fn list_active(
    State(state): State<AppState>,
) -> Result<Json<Vec<Promotion>>, ApiError> {
    let promotions = state.promotion_service.list_active().await?;
    Ok(Json(promotions))
}
