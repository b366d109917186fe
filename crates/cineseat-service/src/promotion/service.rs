//! Promotion service: pre-purchase quotes and the public listing.

use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use cineseat_core::error::AppError;
use cineseat_core::result::AppResult;
use cineseat_database::repositories::PromotionRepository;
use cineseat_entity::{DiscountType, Promotion};

/// Quote for applying a promotion code to a prospective purchase.
#[derive(Debug, Clone, Serialize)]
pub struct PromotionQuote {
    pub code: String,
    pub title: String,
    pub discount_type: DiscountType,
    pub discount_amount: f64,
    pub final_amount: f64,
}

#[derive(Clone)]
pub struct PromotionService {
    promotions: PromotionRepository,
}

impl PromotionService {
    pub fn new(promotions: PromotionRepository) -> Self {
        Self { promotions }
    }

    /// Quote the discount for a code without committing anything.
    ///
    /// Applies the same eligibility rules the booking transaction does,
    /// so an accepted quote only fails later if the promotion is
    /// exhausted in between.
    pub async fn validate_code(
        &self,
        code: &str,
        total_amount: f64,
        ticket_count: usize,
    ) -> AppResult<PromotionQuote> {
        let promo = self
            .promotions
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found(format!("promotion {code} not found")))?;

        promo.validate(total_amount, ticket_count, Utc::now())?;
        let discount_amount = promo.discount_for(total_amount);

        debug!(code, discount_amount, "Promotion quoted");
        Ok(PromotionQuote {
            code: promo.code,
            title: promo.title,
            discount_type: promo.discount_type,
            discount_amount,
            final_amount: total_amount - discount_amount,
        })
    }

    /// Currently redeemable promotions.
    pub async fn list_active(&self) -> AppResult<Vec<Promotion>> {
        self.promotions.list_active(Utc::now()).await
    }
}
