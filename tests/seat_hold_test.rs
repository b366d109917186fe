//! Integration tests for the distributed seat hold layer.

mod helpers;

use std::time::Duration;

use uuid::Uuid;

use cineseat_lockstore::SeatLockManager;

#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn test_hold_is_exclusive_between_users() {
    let env = helpers::TestEnv::new().await;
    let showtime_id = Uuid::new_v4();
    let seat_id = Uuid::new_v4();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let first = env
        .lock_manager
        .hold_seats(showtime_id, &[seat_id], alice)
        .await
        .unwrap();
    assert!(first.all_held());

    let second = env
        .lock_manager
        .hold_seats(showtime_id, &[seat_id], bob)
        .await
        .unwrap();
    assert!(second.all_failed());
    assert_eq!(second.failed[0].seat_id, seat_id);
    assert_eq!(second.failed[0].reason, "seat is held by another user");

    let holder = env.lock_manager.holder_of(showtime_id, seat_id).await.unwrap();
    assert_eq!(holder, Some(alice));
}

#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn test_rehold_by_same_user_refreshes() {
    let env = helpers::TestEnv::new().await;
    let showtime_id = Uuid::new_v4();
    let seat_id = Uuid::new_v4();
    let alice = Uuid::new_v4();

    let first = env
        .lock_manager
        .hold_seats(showtime_id, &[seat_id], alice)
        .await
        .unwrap();
    assert!(first.all_held());

    // Same holder again: refreshed, not rejected.
    let again = env
        .lock_manager
        .hold_seats(showtime_id, &[seat_id], alice)
        .await
        .unwrap();
    assert!(again.all_held());
    assert!(again.failed.is_empty());
}

#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn test_release_requires_ownership() {
    let env = helpers::TestEnv::new().await;
    let showtime_id = Uuid::new_v4();
    let seat_id = Uuid::new_v4();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    env.lock_manager
        .hold_seats(showtime_id, &[seat_id], alice)
        .await
        .unwrap();

    let foreign = env
        .lock_manager
        .release_seats(showtime_id, &[seat_id], bob)
        .await
        .unwrap();
    assert!(foreign.all_failed());
    assert_eq!(foreign.failed[0].reason, "seat is held by another user");

    // The hold survives the foreign release attempt.
    let holder = env.lock_manager.holder_of(showtime_id, seat_id).await.unwrap();
    assert_eq!(holder, Some(alice));

    let owned = env
        .lock_manager
        .release_seats(showtime_id, &[seat_id], alice)
        .await
        .unwrap();
    assert!(owned.all_held());
    assert_eq!(
        env.lock_manager.holder_of(showtime_id, seat_id).await.unwrap(),
        None
    );
}

#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn test_release_of_unheld_seat_fails() {
    let env = helpers::TestEnv::new().await;
    let showtime_id = Uuid::new_v4();
    let seat_id = Uuid::new_v4();

    let outcome = env
        .lock_manager
        .release_seats(showtime_id, &[seat_id], Uuid::new_v4())
        .await
        .unwrap();
    assert!(outcome.all_failed());
    assert_eq!(outcome.failed[0].reason, "seat is not held");
}

#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn test_snapshot_lists_live_holds_with_ttl() {
    let env = helpers::TestEnv::new().await;
    let showtime_id = Uuid::new_v4();
    let seats = [Uuid::new_v4(), Uuid::new_v4()];
    let alice = Uuid::new_v4();

    env.lock_manager
        .hold_seats(showtime_id, &seats, alice)
        .await
        .unwrap();

    let holds = env.lock_manager.snapshot(showtime_id).await.unwrap();
    assert_eq!(holds.len(), 2);
    for hold in &holds {
        assert!(seats.contains(&hold.seat_id));
        assert_eq!(hold.holder_id, alice);
        assert!(hold.ttl_seconds > 0 && hold.ttl_seconds <= 300);
    }

    // Holds of another showtime are invisible.
    let other = env.lock_manager.snapshot(Uuid::new_v4()).await.unwrap();
    assert!(other.is_empty());
}

#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn test_snapshot_excludes_expired_holds() {
    let env = helpers::TestEnv::new().await;
    // A one-second TTL so the hold expires within the test.
    let short_ttl = SeatLockManager::new(env.lock_client.clone(), 1);
    let showtime_id = Uuid::new_v4();
    let seat_id = Uuid::new_v4();

    let held = short_ttl
        .hold_seats(showtime_id, &[seat_id], Uuid::new_v4())
        .await
        .unwrap();
    assert!(held.all_held());

    tokio::time::sleep(Duration::from_secs(2)).await;

    let holds = short_ttl.snapshot(showtime_id).await.unwrap();
    assert!(holds.is_empty());
    assert_eq!(
        short_ttl.holder_of(showtime_id, seat_id).await.unwrap(),
        None
    );
}

#[tokio::test]
#[ignore = "requires postgres and redis"]
async fn test_cleared_seats_become_holdable() {
    let env = helpers::TestEnv::new().await;
    let showtime_id = Uuid::new_v4();
    let seat_id = Uuid::new_v4();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    env.lock_manager
        .hold_seats(showtime_id, &[seat_id], alice)
        .await
        .unwrap();
    env.lock_manager
        .clear_seats(showtime_id, &[seat_id])
        .await
        .unwrap();

    let outcome = env
        .lock_manager
        .hold_seats(showtime_id, &[seat_id], bob)
        .await
        .unwrap();
    assert!(outcome.all_held());
}
