//! Showtime and seat reference models.
//!
//! Showtimes and seats are owned by the catalog service; the engine reads
//! them for pricing and labeling only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A scheduled screening with its base ticket price.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Showtime {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Base price for a STANDARD seat; other types scale from this.
    pub price: f64,
}

/// Physical seat category, stored as the Postgres `seat_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "seat_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum SeatType {
    Standard,
    Vip,
    Couple,
}

impl SeatType {
    /// Price of one seat of this type given the showtime's base price.
    ///
    /// VIP carries a 25% surcharge; COUPLE seats are priced per seat at
    /// the base rate.
    pub fn price(&self, base_price: f64) -> f64 {
        match self {
            Self::Vip => base_price * 1.25,
            Self::Standard | Self::Couple => base_price,
        }
    }
}

/// One seat in an auditorium.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Seat {
    pub id: Uuid,
    pub row: String,
    pub number: i32,
    pub seat_type: SeatType,
    pub is_active: bool,
}

impl Seat {
    /// Human-readable label, e.g. `A12`.
    pub fn label(&self) -> String {
        format!("{}{}", self.row, self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vip_price_surcharge() {
        assert_eq!(SeatType::Vip.price(100_000.0), 125_000.0);
        assert_eq!(SeatType::Standard.price(100_000.0), 100_000.0);
        assert_eq!(SeatType::Couple.price(100_000.0), 100_000.0);
    }

    #[test]
    fn test_seat_label() {
        let seat = Seat {
            id: Uuid::new_v4(),
            row: "A".to_string(),
            number: 12,
            seat_type: SeatType::Standard,
            is_active: true,
        };
        assert_eq!(seat.label(), "A12");
    }
}
