//! Promotion model and its pure eligibility / discount rules.

use chrono::{DateTime, Utc};
use cineseat_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::discount::DiscountType;

/// A discount campaign identified by its unique code.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Promotion {
    pub id: Uuid,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    /// Minimum pre-discount subtotal required to qualify.
    pub min_purchase: Option<f64>,
    /// Ceiling on a percentage discount's absolute value.
    pub max_discount: Option<f64>,
    /// Total redemptions allowed across all users.
    pub usage_limit: Option<i32>,
    pub used_count: i32,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// Minimum number of tickets in the booking.
    pub min_tickets: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Promotion {
    /// Check every eligibility rule against a prospective purchase.
    ///
    /// `subtotal` is the pre-discount amount. Promotion application is
    /// all-or-nothing: the first failing rule rejects the whole purchase
    /// with a validation error naming the condition.
    pub fn validate(&self, subtotal: f64, ticket_count: usize, now: DateTime<Utc>) -> AppResult<()> {
        if !self.is_active {
            return Err(AppError::validation(format!(
                "promotion {} is not active",
                self.code
            )));
        }
        if let Some(start) = self.start_date {
            if now < start {
                return Err(AppError::validation(format!(
                    "promotion {} has not started yet",
                    self.code
                )));
            }
        }
        if let Some(end) = self.end_date {
            if now > end {
                return Err(AppError::validation(format!(
                    "promotion {} has expired",
                    self.code
                )));
            }
        }
        if let Some(limit) = self.usage_limit {
            if self.used_count >= limit {
                return Err(AppError::validation(format!(
                    "promotion {} has reached its usage limit",
                    self.code
                )));
            }
        }
        if let Some(min_purchase) = self.min_purchase {
            if subtotal < min_purchase {
                return Err(AppError::validation(format!(
                    "promotion {} requires a minimum purchase of {min_purchase}",
                    self.code
                )));
            }
        }
        if ticket_count < self.min_tickets as usize {
            return Err(AppError::validation(format!(
                "promotion {} requires at least {} tickets",
                self.code, self.min_tickets
            )));
        }
        Ok(())
    }

    /// Discount amount for a qualifying subtotal.
    ///
    /// Percentage discounts are capped by `max_discount`; every discount
    /// is clamped so it never exceeds the subtotal.
    pub fn discount_for(&self, subtotal: f64) -> f64 {
        let raw = match self.discount_type {
            DiscountType::Percentage => {
                let amount = subtotal * self.discount_value / 100.0;
                match self.max_discount {
                    Some(cap) => amount.min(cap),
                    None => amount,
                }
            }
            DiscountType::Fixed => self.discount_value,
        };
        raw.min(subtotal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use cineseat_core::error::ErrorKind;

    fn promotion() -> Promotion {
        let now = Utc::now();
        Promotion {
            id: Uuid::new_v4(),
            code: "WEEKEND10".to_string(),
            title: "Weekend 10%".to_string(),
            description: None,
            discount_type: DiscountType::Percentage,
            discount_value: 10.0,
            min_purchase: Some(100_000.0),
            max_discount: Some(30_000.0),
            usage_limit: Some(100),
            used_count: 0,
            start_date: Some(now - Duration::days(1)),
            end_date: Some(now + Duration::days(1)),
            min_tickets: 2,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_valid_promotion_passes() {
        let promo = promotion();
        assert!(promo.validate(200_000.0, 2, Utc::now()).is_ok());
    }

    #[test]
    fn test_inactive_rejected() {
        let mut promo = promotion();
        promo.is_active = false;
        let err = promo.validate(200_000.0, 2, Utc::now()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("not active"));
    }

    #[test]
    fn test_window_boundaries() {
        let promo = promotion();
        let before = promo.start_date.unwrap() - Duration::seconds(1);
        let after = promo.end_date.unwrap() + Duration::seconds(1);
        assert!(promo.validate(200_000.0, 2, before).is_err());
        assert!(promo.validate(200_000.0, 2, after).is_err());
        // Exact boundary instants qualify.
        assert!(promo.validate(200_000.0, 2, promo.start_date.unwrap()).is_ok());
        assert!(promo.validate(200_000.0, 2, promo.end_date.unwrap()).is_ok());
    }

    #[test]
    fn test_usage_ceiling() {
        let mut promo = promotion();
        promo.used_count = 100;
        let err = promo.validate(200_000.0, 2, Utc::now()).unwrap_err();
        assert!(err.message.contains("usage limit"));
    }

    #[test]
    fn test_min_purchase_uses_prediscount_subtotal() {
        let promo = promotion();
        let err = promo.validate(99_999.0, 2, Utc::now()).unwrap_err();
        assert!(err.message.contains("minimum purchase"));
        assert!(promo.validate(100_000.0, 2, Utc::now()).is_ok());
    }

    #[test]
    fn test_min_tickets() {
        let promo = promotion();
        assert!(promo.validate(200_000.0, 1, Utc::now()).is_err());
        assert!(promo.validate(200_000.0, 2, Utc::now()).is_ok());
    }

    #[test]
    fn test_percentage_discount_capped() {
        let promo = promotion();
        // 10% of 500_000 = 50_000, capped at 30_000.
        assert_eq!(promo.discount_for(500_000.0), 30_000.0);
        // 10% of 200_000 = 20_000, under the cap.
        assert_eq!(promo.discount_for(200_000.0), 20_000.0);
    }

    #[test]
    fn test_fixed_discount_clamped_to_subtotal() {
        let mut promo = promotion();
        promo.discount_type = DiscountType::Fixed;
        promo.discount_value = 50_000.0;
        assert_eq!(promo.discount_for(40_000.0), 40_000.0);
        assert_eq!(promo.discount_for(120_000.0), 50_000.0);
    }
}
