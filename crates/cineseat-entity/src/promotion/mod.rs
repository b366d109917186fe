//! Promotions: eligibility rules and discount math.

pub mod discount;
pub mod model;

pub use discount::DiscountType;
pub use model::Promotion;
