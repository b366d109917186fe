//! Ticket code generation.

use uuid::Uuid;

/// Deterministic ticket code assigned at confirmation.
pub fn ticket_code(booking_id: Uuid, seat_id: Uuid) -> String {
    format!("TICKET-{booking_id}-{seat_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_code_format() {
        let booking_id = Uuid::nil();
        let seat_id = Uuid::nil();
        assert_eq!(
            ticket_code(booking_id, seat_id),
            format!("TICKET-{booking_id}-{seat_id}")
        );
        assert!(ticket_code(booking_id, seat_id).starts_with("TICKET-"));
    }
}
