//! Integration tests for the booking lifecycle.

mod helpers;

use uuid::Uuid;

use cineseat_core::error::ErrorKind;
use cineseat_entity::BookingStatus;
use cineseat_service::RequestContext;
use cineseat_service::booking::service::{ConfirmBooking, CreateBooking};

fn create_input(showtime_id: Uuid, seat_ids: Vec<Uuid>) -> CreateBooking {
    CreateBooking {
        showtime_id,
        seat_ids,
        promotion_code: None,
    }
}

fn confirm_input() -> ConfirmBooking {
    ConfirmBooking {
        payment_method: "card".to_string(),
        transaction_reference: Some("txn-123".to_string()),
    }
}

#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn test_create_booking_rejects_unheld_seats() {
    let env = helpers::TestEnv::new().await;
    let showtime_id = env.upcoming_showtime(100.0).await;
    let seats = env.seed_seats(2).await;
    let ctx = RequestContext::new(Uuid::new_v4());

    let err = env
        .booking_service
        .create_booking(&ctx, create_input(showtime_id, seats))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn test_create_then_confirm_flow() {
    let env = helpers::TestEnv::new().await;
    let showtime_id = env.upcoming_showtime(100.0).await;
    let seats = env.seed_seats(2).await;
    let ctx = RequestContext::new(Uuid::new_v4());

    let held = env
        .lock_manager
        .hold_seats(showtime_id, &seats, ctx.user_id)
        .await
        .unwrap();
    assert!(held.all_held());

    let detail = env
        .booking_service
        .create_booking(&ctx, create_input(showtime_id, seats.clone()))
        .await
        .unwrap();
    assert_eq!(detail.booking.status, BookingStatus::Pending);
    assert_eq!(detail.booking.total_amount, 200.0);
    assert_eq!(detail.booking.final_amount, 200.0);
    assert_eq!(detail.seats.len(), 2);
    for line in &detail.seats {
        assert_eq!(line.price, 100.0);
        assert!(line.ticket_code.is_none());
    }

    let confirmed = env
        .booking_service
        .confirm_booking(&ctx, detail.booking.id, confirm_input())
        .await
        .unwrap();
    assert_eq!(confirmed.booking.status, BookingStatus::Confirmed);
    assert_eq!(confirmed.booking.payment_method.as_deref(), Some("card"));
    for line in &confirmed.seats {
        let expected = format!("TICKET-{}-{}", detail.booking.id, line.seat_id);
        assert_eq!(line.ticket_code.as_deref(), Some(expected.as_str()));
    }

    // Confirmation drops the advisory holds.
    for &seat_id in &seats {
        let holder = env.lock_manager.holder_of(showtime_id, seat_id).await.unwrap();
        assert_eq!(holder, None);
    }

    // The seats now appear in the public booked listing.
    let booked = env.booking_service.booked_seat_ids(showtime_id).await.unwrap();
    assert_eq!(booked.len(), 2);
}

#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn test_booked_seats_cannot_be_rebooked() {
    let env = helpers::TestEnv::new().await;
    let showtime_id = env.upcoming_showtime(100.0).await;
    let seats = env.seed_seats(1).await;

    let alice = RequestContext::new(Uuid::new_v4());
    env.lock_manager
        .hold_seats(showtime_id, &seats, alice.user_id)
        .await
        .unwrap();
    let detail = env
        .booking_service
        .create_booking(&alice, create_input(showtime_id, seats.clone()))
        .await
        .unwrap();

    // Simulate the hold expiring while the booking is still PENDING.
    env.lock_manager.clear_seats(showtime_id, &seats).await.unwrap();

    let bob = RequestContext::new(Uuid::new_v4());
    let held = env
        .lock_manager
        .hold_seats(showtime_id, &seats, bob.user_id)
        .await
        .unwrap();
    assert!(held.all_held());

    // The transaction-level guard still rejects the second sale.
    let err = env
        .booking_service
        .create_booking(&bob, create_input(showtime_id, seats))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert!(err.message.contains("already booked"));

    // Alice's booking is untouched.
    let mine = env
        .booking_service
        .get_booking(&alice, detail.booking.id)
        .await
        .unwrap();
    assert_eq!(mine.booking.status, BookingStatus::Pending);
}

#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn test_concurrent_purchase_commits_exactly_once() {
    let env = helpers::TestEnv::new().await;
    let showtime_id = env.upcoming_showtime(100.0).await;
    let seats = env.seed_seats(1).await;

    let alice = RequestContext::new(Uuid::new_v4());
    let bob = RequestContext::new(Uuid::new_v4());

    // Both users race for the same seat; the lock store linearizes the
    // holds, so exactly one hold succeeds and only that user's booking
    // reaches the transaction.
    let (held_a, held_b) = tokio::join!(
        env.lock_manager.hold_seats(showtime_id, &seats, alice.user_id),
        env.lock_manager.hold_seats(showtime_id, &seats, bob.user_id),
    );
    let held_a = held_a.unwrap();
    let held_b = held_b.unwrap();
    assert!(held_a.all_held() != held_b.all_held());

    let (booked_a, booked_b) = tokio::join!(
        env.booking_service
            .create_booking(&alice, create_input(showtime_id, seats.clone())),
        env.booking_service
            .create_booking(&bob, create_input(showtime_id, seats.clone())),
    );
    assert!(booked_a.is_ok() != booked_b.is_ok());

    let booked = env.booking_service.booked_seat_ids(showtime_id).await.unwrap();
    assert_eq!(booked, seats);
}

#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn test_concurrent_confirm_succeeds_exactly_once() {
    let env = helpers::TestEnv::new().await;
    let showtime_id = env.upcoming_showtime(100.0).await;
    let seats = env.seed_seats(1).await;
    let ctx = RequestContext::new(Uuid::new_v4());

    env.lock_manager
        .hold_seats(showtime_id, &seats, ctx.user_id)
        .await
        .unwrap();
    let detail = env
        .booking_service
        .create_booking(&ctx, create_input(showtime_id, seats))
        .await
        .unwrap();

    // The PENDING guard lives in the confirmation UPDATE itself, so two
    // racing confirmations cannot both commit.
    let (first, second) = tokio::join!(
        env.booking_service
            .confirm_booking(&ctx, detail.booking.id, confirm_input()),
        env.booking_service
            .confirm_booking(&ctx, detail.booking.id, confirm_input()),
    );
    assert!(first.is_ok() != second.is_ok());
    let loser = if first.is_err() { first } else { second };
    assert_eq!(loser.unwrap_err().kind, ErrorKind::InvalidState);

    let confirmed = env
        .booking_service
        .get_booking(&ctx, detail.booking.id)
        .await
        .unwrap();
    assert_eq!(confirmed.booking.status, BookingStatus::Confirmed);
}

#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn test_promotion_discounts_and_counts_usage() {
    let env = helpers::TestEnv::new().await;
    let showtime_id = env.upcoming_showtime(100.0).await;
    let seats = env.seed_seats(2).await;
    let promo_id = env.seed_percentage_promotion("SAVE10", 10.0, None).await;
    let ctx = RequestContext::new(Uuid::new_v4());

    env.lock_manager
        .hold_seats(showtime_id, &seats, ctx.user_id)
        .await
        .unwrap();

    let detail = env
        .booking_service
        .create_booking(
            &ctx,
            CreateBooking {
                showtime_id,
                seat_ids: seats,
                promotion_code: Some("SAVE10".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(detail.booking.total_amount, 200.0);
    assert_eq!(detail.booking.discount_amount, 20.0);
    assert_eq!(detail.booking.final_amount, 180.0);
    assert_eq!(detail.booking.promotion_code.as_deref(), Some("SAVE10"));
    // The discount is spread across the seat lines.
    for line in &detail.seats {
        assert!((line.price - 90.0).abs() < 1e-9);
    }

    assert_eq!(env.promotion_used_count(promo_id).await, 1);
}

#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn test_unknown_promotion_code_rejects_booking() {
    let env = helpers::TestEnv::new().await;
    let showtime_id = env.upcoming_showtime(100.0).await;
    let seats = env.seed_seats(1).await;
    let ctx = RequestContext::new(Uuid::new_v4());

    env.lock_manager
        .hold_seats(showtime_id, &seats, ctx.user_id)
        .await
        .unwrap();

    let err = env
        .booking_service
        .create_booking(
            &ctx,
            CreateBooking {
                showtime_id,
                seat_ids: seats,
                promotion_code: Some("NOPE".to_string()),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    // All-or-nothing: no booking row was written.
    let booked = env.booking_service.booked_seat_ids(showtime_id).await.unwrap();
    assert!(booked.is_empty());
}

#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn test_vip_seats_carry_surcharge() {
    let env = helpers::TestEnv::new().await;
    let showtime_id = env.upcoming_showtime(100.0).await;
    let standard = env.seed_seat("A", 1, "STANDARD").await;
    let vip = env.seed_seat("B", 1, "VIP").await;
    let ctx = RequestContext::new(Uuid::new_v4());

    let seats = vec![standard, vip];
    env.lock_manager
        .hold_seats(showtime_id, &seats, ctx.user_id)
        .await
        .unwrap();

    let detail = env
        .booking_service
        .create_booking(&ctx, create_input(showtime_id, seats))
        .await
        .unwrap();
    assert_eq!(detail.booking.total_amount, 225.0);

    let vip_line = detail.seats.iter().find(|l| l.seat_id == vip).unwrap();
    assert_eq!(vip_line.price, 125.0);
}

#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn test_cancel_frees_seats() {
    let env = helpers::TestEnv::new().await;
    let showtime_id = env.upcoming_showtime(100.0).await;
    let seats = env.seed_seats(1).await;

    let alice = RequestContext::new(Uuid::new_v4());
    env.lock_manager
        .hold_seats(showtime_id, &seats, alice.user_id)
        .await
        .unwrap();
    let detail = env
        .booking_service
        .create_booking(&alice, create_input(showtime_id, seats.clone()))
        .await
        .unwrap();

    let cancelled = env
        .booking_service
        .cancel_booking(&alice, detail.booking.id)
        .await
        .unwrap();
    assert_eq!(cancelled.booking.status, BookingStatus::Cancelled);

    // Cancelling twice is rejected.
    let err = env
        .booking_service
        .cancel_booking(&alice, detail.booking.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidState);

    // Another user can now hold and book the same seat.
    let bob = RequestContext::new(Uuid::new_v4());
    let held = env
        .lock_manager
        .hold_seats(showtime_id, &seats, bob.user_id)
        .await
        .unwrap();
    assert!(held.all_held());
    let rebooked = env
        .booking_service
        .create_booking(&bob, create_input(showtime_id, seats))
        .await
        .unwrap();
    assert_eq!(rebooked.booking.status, BookingStatus::Pending);
}

#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn test_booking_access_is_owner_scoped() {
    let env = helpers::TestEnv::new().await;
    let showtime_id = env.upcoming_showtime(100.0).await;
    let seats = env.seed_seats(1).await;

    let alice = RequestContext::new(Uuid::new_v4());
    env.lock_manager
        .hold_seats(showtime_id, &seats, alice.user_id)
        .await
        .unwrap();
    let detail = env
        .booking_service
        .create_booking(&alice, create_input(showtime_id, seats))
        .await
        .unwrap();

    let bob = RequestContext::new(Uuid::new_v4());
    let err = env
        .booking_service
        .get_booking(&bob, detail.booking.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let err = env
        .booking_service
        .confirm_booking(&bob, detail.booking.id, confirm_input())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}
