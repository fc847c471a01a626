use picketline_application::services::{
    BlockedAttemptLog, BlockingStats, SnapshotCache, BLOCKED_COUNT_KEY,
};
use picketline_application::use_cases::{
    CheckDestinationUseCase, DestinationVerdict, GetStatusUseCase, GuardDestinationUseCase,
};
use std::sync::Arc;

mod helpers;
use helpers::*;

struct Fixture {
    store: MockKeyValueStore,
    attempts: Arc<BlockedAttemptLog>,
    guard: GuardDestinationUseCase,
    cache: Arc<SnapshotCache>,
}

fn fixture() -> Fixture {
    let store = MockKeyValueStore::new();
    let cache = Arc::new(SnapshotCache::new(Arc::new(store.clone())));
    cache.replace(snapshot_with(
        "h1",
        vec![record("example.com", "ExCo"), record("acme.org", "Acme")],
        vec![],
    ));
    let attempts = Arc::new(BlockedAttemptLog::new(Arc::new(store.clone())));
    let guard = GuardDestinationUseCase::new(
        Arc::new(CheckDestinationUseCase::new(cache.clone())),
        attempts.clone(),
    );
    Fixture {
        store,
        attempts,
        guard,
        cache,
    }
}

#[tokio::test]
async fn test_blocked_destination_is_logged_and_counted() {
    let f = fixture();

    let verdict = f.guard.execute("https://shop.example.com/cart").await;

    let record = match verdict {
        DestinationVerdict::Blocked(record) => record,
        other => panic!("expected Blocked, got {:?}", other),
    };
    assert_eq!(&*record.employer_name, "ExCo");
    assert_eq!(f.attempts.blocked_count(), 1);
    assert_eq!(f.store.raw(BLOCKED_COUNT_KEY).await.unwrap(), b"1".to_vec());

    let attempts = f.attempts.attempts().await;
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].destination, "https://shop.example.com/cart");
    assert_eq!(&*attempts[0].host, "example.com");
    assert_eq!(&*attempts[0].action_id, &*record.action_id);
    assert!(!attempts[0].allowed);
}

#[tokio::test]
async fn test_clear_destination_is_not_logged() {
    let f = fixture();

    assert_eq!(f.guard.execute("unrelated.net").await, DestinationVerdict::Clear);
    assert_eq!(f.attempts.blocked_count(), 0);
    assert!(f.attempts.attempts().await.is_empty());
    assert!(f.store.raw(BLOCKED_COUNT_KEY).await.is_none());
}

#[tokio::test]
async fn test_allowed_destination_is_not_flagged_again() {
    let f = fixture();
    assert!(f.guard.execute("acme.org/jobs").await.is_blocked());

    let allowed = f.guard.allow("acme.org/jobs").await.unwrap();
    assert_eq!(&*allowed.employer_name, "Acme");

    let again = f.guard.execute("acme.org/jobs").await;
    assert!(matches!(again, DestinationVerdict::AllowedForSession(_)));
    // Other URLs on the same host are still flagged
    assert!(f.guard.execute("acme.org/store").await.is_blocked());

    assert_eq!(f.attempts.blocked_count(), 2);
    assert_eq!(
        f.attempts.stats().await,
        BlockingStats {
            total: 3,
            allowed: 1,
            blocked: 2
        }
    );
}

#[tokio::test]
async fn test_allow_ignores_destination_not_on_blocklist() {
    let f = fixture();

    assert!(f.guard.allow("unrelated.net").await.is_none());
    assert!(!f.attempts.is_allowed("unrelated.net").await);
}

#[tokio::test]
async fn test_end_session_forgets_allow_decisions() {
    let f = fixture();
    f.guard.allow("example.com").await.unwrap();

    f.attempts.end_session().await;

    assert!(f.guard.execute("example.com").await.is_blocked());
}

#[tokio::test]
async fn test_count_survives_restart() {
    let f = fixture();
    f.guard.execute("example.com").await;
    f.guard.execute("acme.org").await;

    let restarted = BlockedAttemptLog::new(Arc::new(f.store.clone()));
    assert_eq!(restarted.restore().await, 2);
    assert_eq!(restarted.blocked_count(), 2);
    assert!(restarted.attempts().await.is_empty());
}

#[tokio::test]
async fn test_unreadable_count_restores_as_zero() {
    let store = MockKeyValueStore::new();
    store.insert_raw(BLOCKED_COUNT_KEY, b"many").await;

    let attempts = BlockedAttemptLog::new(Arc::new(store));
    assert_eq!(attempts.restore().await, 0);
}

#[tokio::test]
async fn test_failed_count_write_still_blocks() {
    let f = fixture();
    f.store.set_fail_writes(true).await;

    assert!(f.guard.execute("example.com").await.is_blocked());
    assert_eq!(f.attempts.blocked_count(), 1);
}

#[tokio::test]
async fn test_reset_clears_log_and_durable_count() {
    let f = fixture();
    f.guard.execute("example.com").await;
    f.guard.allow("acme.org").await.unwrap();

    f.guard.reset_stats().await.unwrap();

    assert_eq!(f.attempts.blocked_count(), 0);
    assert_eq!(f.attempts.stats().await, BlockingStats::default());
    assert!(f.store.raw(BLOCKED_COUNT_KEY).await.is_none());
    assert!(f.guard.execute("acme.org").await.is_blocked());
}

#[tokio::test]
async fn test_nothing_is_logged_without_snapshot() {
    let f = fixture();
    f.cache.clear().await;

    assert_eq!(f.guard.execute("example.com").await, DestinationVerdict::Clear);
    assert_eq!(f.attempts.blocked_count(), 0);
}

#[tokio::test]
async fn test_status_reports_blocked_count() {
    let f = fixture();
    let status = GetStatusUseCase::new(
        f.cache.clone(),
        Arc::new(MockCredentialStore::new()),
        f.attempts.clone(),
    );
    f.guard.execute("example.com").await;
    f.guard.allow("example.com").await.unwrap();

    let report = status.execute().await.unwrap();

    assert_eq!(report.blocked_count, 1);
    assert_eq!(report.session.total, 2);
    assert_eq!(report.session.allowed, 1);
}
