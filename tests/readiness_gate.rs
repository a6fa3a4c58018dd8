mod common;

use std::cell::Cell;
use std::time::Duration;

use common::DelayedRefresher;
use storefront_session::gate::{wait_until_ready, Readiness, ReadinessCheck};
use storefront_session::session::{Role, Session, SessionStore};
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_already_ready_never_refreshes() {
    let store = SessionStore::with_session(Session::new("existing-token", Role::Customer));
    let refresher = DelayedRefresher::after(Duration::from_millis(10), Role::Customer);

    let readiness = store
        .wait_until_authenticated(&refresher, &ReadinessCheck::default())
        .await;

    assert_eq!(readiness, Readiness::Ready);
    assert_eq!(refresher.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_ready_after_refresh_calls_refresh_once() {
    let store = SessionStore::new();
    let refresher = DelayedRefresher::after(Duration::from_millis(300), Role::Seller);

    let start = Instant::now();
    let readiness = store
        .wait_until_authenticated(&refresher, &ReadinessCheck::default())
        .await;

    assert!(readiness.is_ready());
    assert_eq!(refresher.call_count(), 1);
    assert!(start.elapsed() < ReadinessCheck::DEFAULT_TIMEOUT);
    assert_eq!(store.role(), Some(Role::Seller));
}

#[tokio::test(start_paused = true)]
async fn test_predicate_turning_true_while_polling() {
    let start = Instant::now();
    let refreshes = Cell::new(0);
    let counter = &refreshes;

    let ready = wait_until_ready(
        || start.elapsed() >= Duration::from_millis(730),
        || async move { counter.set(counter.get() + 1) },
        Duration::from_secs(5),
        Duration::from_millis(100),
    )
    .await;

    assert!(ready);
    assert_eq!(refreshes.get(), 1);
    // Seen on the first poll after it turned true.
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(730));
    assert!(elapsed <= Duration::from_millis(830));
}

#[tokio::test(start_paused = true)]
async fn test_never_ready_times_out_in_window() {
    let start = Instant::now();
    let ready = wait_until_ready(
        || false,
        || async {},
        Duration::from_millis(200),
        Duration::from_millis(50),
    )
    .await;
    let elapsed = start.elapsed();

    assert!(!ready);
    assert!(elapsed >= Duration::from_millis(200));
    assert!(elapsed <= Duration::from_millis(250));
}

#[tokio::test(start_paused = true)]
async fn test_failed_refresh_times_out_without_retry() {
    let store = SessionStore::new();
    let refresher = DelayedRefresher::failing();
    let check = ReadinessCheck::new(Duration::from_millis(400), Duration::from_millis(100));

    let readiness = store.wait_until_authenticated(&refresher, &check).await;

    assert_eq!(readiness, Readiness::TimedOut);
    assert_eq!(refresher.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_refresh_slower_than_timeout_checks_once_more() {
    let store = SessionStore::new();
    let refresher = DelayedRefresher::after(Duration::from_millis(800), Role::Customer);
    let check = ReadinessCheck::new(Duration::from_millis(500), Duration::from_millis(100));

    let readiness = store.wait_until_authenticated(&refresher, &check).await;

    // The token landed during the refresh, so the first check after it sees it.
    assert_eq!(readiness, Readiness::Ready);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_gates_may_each_refresh() {
    let store = SessionStore::new();
    let refresher = DelayedRefresher::after(Duration::from_millis(50), Role::Customer);
    let check = ReadinessCheck::default();

    let (a, b) = tokio::join!(
        store.wait_until_authenticated(&refresher, &check),
        store.wait_until_authenticated(&refresher, &check),
    );

    assert!(a.is_ready() && b.is_ready());
    assert_eq!(refresher.call_count(), 2);
}
