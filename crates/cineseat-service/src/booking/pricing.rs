//! Pure pricing math for a booking.
//!
//! Prices are computed once from the showtime's base price and the seat
//! types, then the discount is spread proportionally across seats so the
//! per-seat prices always sum to the final amount (up to float rounding).

use serde::Serialize;
use uuid::Uuid;

use cineseat_entity::{Seat, SeatType, Showtime};

/// One seat with its prices.
#[derive(Debug, Clone, Serialize)]
pub struct SeatPrice {
    pub seat_id: Uuid,
    /// Display label, e.g. `A12`.
    pub label: String,
    pub seat_type: SeatType,
    /// Undiscounted price for this seat.
    pub base_price: f64,
    /// Price after the proportional discount share.
    pub final_price: f64,
}

/// Priced view of a whole booking.
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub seats: Vec<SeatPrice>,
    /// Sum of undiscounted seat prices.
    pub total_amount: f64,
    pub discount_amount: f64,
    pub final_amount: f64,
}

/// Price the given seats and spread `discount_amount` proportionally.
pub fn quote(showtime: &Showtime, seats: &[Seat], discount_amount: f64) -> Quote {
    let total_amount: f64 = seats
        .iter()
        .map(|s| s.seat_type.price(showtime.price))
        .sum();
    let final_amount = total_amount - discount_amount;
    let ratio = if total_amount > 0.0 {
        final_amount / total_amount
    } else {
        1.0
    };

    let seats = seats
        .iter()
        .map(|seat| {
            let base_price = seat.seat_type.price(showtime.price);
            SeatPrice {
                seat_id: seat.id,
                label: seat.label(),
                seat_type: seat.seat_type,
                base_price,
                final_price: base_price * ratio,
            }
        })
        .collect();

    Quote {
        seats,
        total_amount,
        discount_amount,
        final_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn showtime(price: f64) -> Showtime {
        let now = Utc::now();
        Showtime {
            id: Uuid::new_v4(),
            start_time: now + Duration::hours(2),
            end_time: now + Duration::hours(4),
            price,
        }
    }

    fn seat(seat_type: SeatType) -> Seat {
        Seat {
            id: Uuid::new_v4(),
            row: "A".to_string(),
            number: 1,
            seat_type,
            is_active: true,
        }
    }

    #[test]
    fn test_two_standard_seats_at_base_price() {
        let q = quote(&showtime(100_000.0), &[seat(SeatType::Standard), seat(SeatType::Standard)], 0.0);
        assert_eq!(q.total_amount, 200_000.0);
        assert_eq!(q.final_amount, 200_000.0);
        assert_eq!(q.seats[0].final_price, 100_000.0);
    }

    #[test]
    fn test_vip_surcharge_in_total() {
        let q = quote(&showtime(100_000.0), &[seat(SeatType::Vip), seat(SeatType::Standard)], 0.0);
        assert_eq!(q.total_amount, 225_000.0);
        assert_eq!(q.seats[0].base_price, 125_000.0);
    }

    #[test]
    fn test_discount_spread_reconciles() {
        let seats = [seat(SeatType::Vip), seat(SeatType::Standard), seat(SeatType::Couple)];
        let q = quote(&showtime(100_000.0), &seats, 30_000.0);
        assert_eq!(q.final_amount, q.total_amount - 30_000.0);
        let per_seat_sum: f64 = q.seats.iter().map(|s| s.final_price).sum();
        assert!((per_seat_sum - q.final_amount).abs() < 1e-6);
        // Discounted proportionally, so the VIP seat keeps its premium.
        assert!(q.seats[0].final_price > q.seats[1].final_price);
    }

    #[test]
    fn test_full_discount_zeroes_prices() {
        let seats = [seat(SeatType::Standard)];
        let q = quote(&showtime(100_000.0), &seats, 100_000.0);
        assert_eq!(q.final_amount, 0.0);
        assert_eq!(q.seats[0].final_price, 0.0);
    }
}
