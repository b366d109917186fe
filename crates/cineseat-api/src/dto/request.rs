//! Request bodies.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use cineseat_core::types::pagination::PageRequest;
use cineseat_entity::BookingStatus;

/// Body for hold and release requests.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SeatSelectionRequest {
    pub showtime_id: Uuid,
    #[validate(length(min = 1, message = "seat_ids must not be empty"))]
    pub seat_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub showtime_id: Uuid,
    #[validate(length(min = 1, message = "seat_ids must not be empty"))]
    pub seat_ids: Vec<Uuid>,
    pub promotion_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ConfirmBookingRequest {
    #[validate(length(min = 1, message = "payment_method must not be empty"))]
    pub payment_method: String,
    pub transaction_reference: Option<String>,
}

/// Body for check-in. Without `ticket_id` every unused ticket of the
/// booking is redeemed.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckinRequest {
    pub ticket_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ValidatePromotionRequest {
    #[validate(length(min = 1, message = "code must not be empty"))]
    pub code: String,
    #[validate(range(min = 0.0))]
    pub total_amount: f64,
    #[validate(range(min = 1))]
    pub ticket_count: u32,
}

/// Query string for the booking history listing.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<BookingStatus>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl BookingListQuery {
    /// The pagination window, with defaults and clamping applied.
    pub fn page_request(&self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest::new(
            self.page.unwrap_or(defaults.page),
            self.page_size.unwrap_or(defaults.page_size),
        )
    }
}
