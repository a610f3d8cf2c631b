use crate::tests::{manager_with, sample_identity, seeded_storage, settle};
use crate::{ActivityEvent, DurableStorage, SessionError, SessionEvent, SessionPhase, TOKEN_KEY};

use std::time::Duration;

use tokio::sync::broadcast::error::TryRecvError;
use tokio::time::advance;

const WINDOW: Duration = Duration::from_secs(300);

#[tokio::test(start_paused = true)]
async fn given_no_activity_when_window_elapses_then_logged_out_exactly_once() {
    // Given
    let storage = seeded_storage(&sample_identity("User"));
    let manager = manager_with(storage.clone(), WINDOW);
    manager.restore_session().await;
    let mut events = manager.subscribe();

    // When
    advance(Duration::from_secs(299)).await;
    settle().await;
    assert!(manager.is_authenticated());

    advance(Duration::from_secs(2)).await;
    settle().await;

    // Then
    assert!(!manager.is_authenticated());
    assert!(storage.get(TOKEN_KEY).is_none());
    assert_eq!(events.try_recv().unwrap(), SessionEvent::Expired);

    advance(Duration::from_secs(3600)).await;
    settle().await;
    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test(start_paused = true)]
async fn given_activity_before_deadline_when_window_elapses_from_start_then_still_authenticated() {
    // Given
    let manager = manager_with(seeded_storage(&sample_identity("User")), WINDOW);
    manager.restore_session().await;

    // When
    advance(Duration::from_secs(299)).await;
    settle().await;
    manager.record_activity(ActivityEvent::KeyPress);

    advance(Duration::from_secs(299)).await;
    settle().await;

    // Then
    assert!(manager.is_authenticated());

    advance(Duration::from_secs(2)).await;
    settle().await;
    assert!(!manager.is_authenticated());
}

#[tokio::test(start_paused = true)]
async fn given_expired_session_when_snapshot_then_reports_expiry() {
    // Given
    let manager = manager_with(seeded_storage(&sample_identity("Admin")), WINDOW);
    manager.restore_session().await;

    // When
    advance(WINDOW + Duration::from_secs(1)).await;
    settle().await;
    let snapshot = manager.snapshot();

    // Then
    assert_eq!(snapshot.phase, SessionPhase::Unauthenticated);
    assert!(snapshot.expired);
    assert!(!snapshot.is_admin);
    assert!(matches!(
        snapshot.require_identity(),
        Err(SessionError::SessionExpired { .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn given_logout_when_activity_and_time_pass_then_timer_stays_dead() {
    // Given
    let manager = manager_with(seeded_storage(&sample_identity("User")), WINDOW);
    manager.restore_session().await;
    let mut events = manager.subscribe();

    // When
    manager.logout();
    manager.record_activity(ActivityEvent::PointerMove);
    advance(Duration::from_secs(3600)).await;
    settle().await;

    // Then
    assert!(manager.inactivity_remaining().is_none());
    assert_eq!(events.try_recv().unwrap(), SessionEvent::LoggedOut);
    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test(start_paused = true)]
async fn given_restored_session_when_activity_then_remaining_resets_to_full_window() {
    // Given
    let manager = manager_with(seeded_storage(&sample_identity("User")), WINDOW);
    manager.restore_session().await;
    advance(Duration::from_secs(120)).await;
    assert_eq!(
        manager.inactivity_remaining(),
        Some(Duration::from_secs(180))
    );

    // When
    manager.record_activity(ActivityEvent::Click);

    // Then
    assert_eq!(manager.inactivity_remaining(), Some(WINDOW));
}

#[tokio::test(start_paused = true)]
async fn given_unauthenticated_session_when_activity_then_nothing_armed() {
    let manager = manager_with(std::sync::Arc::new(crate::MemoryStorage::new()), WINDOW);
    manager.restore_session().await;

    manager.record_activity(ActivityEvent::KeyPress);

    assert!(manager.inactivity_remaining().is_none());
    assert!(!manager.is_authenticated());
}
