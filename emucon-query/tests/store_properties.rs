//! Cache behavior: deduplication, invalidation, ordering, gating, polling
//! and garbage collection. All fetchers here are in-memory, so the tests
//! run on paused time.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use emucon_core::ClientError;
use emucon_query::{
    ChannelNotifier, InvalidationSet, Mutation, NotificationLevel, QueryKey, QueryOptions,
    QueryStatus, QueryStore, StoreConfig,
};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use tokio::time::sleep;

/// Fetcher that counts its calls and resolves to the call number after
/// `delay`.
fn counting(
    calls: &Arc<AtomicUsize>,
    delay: Duration,
) -> impl Fn() -> BoxFuture<'static, Result<usize, ClientError>> + Send + Sync + 'static {
    let calls = calls.clone();
    move || {
        let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
        async move {
            sleep(delay).await;
            Ok(n)
        }
        .boxed()
    }
}

fn count(calls: &Arc<AtomicUsize>) -> usize {
    calls.load(Ordering::SeqCst)
}

const FETCH: Duration = Duration::from_millis(20);
const SETTLE: Duration = Duration::from_millis(200);

#[tokio::test(start_paused = true)]
async fn concurrent_subscribers_share_one_fetch() {
    let store = QueryStore::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let key = QueryKey::new("log-groups");

    let mut first = store.query(key.clone(), counting(&calls, FETCH), QueryOptions::default());
    let mut second = store.query(key.clone(), counting(&calls, FETCH), QueryOptions::default());
    first.settled().await;
    second.settled().await;

    assert_eq!(count(&calls), 1);
    assert_eq!(store.observer_count(&key), 2);
    let a = first.data().unwrap();
    let b = second.data().unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(*a, 1);
}

#[tokio::test(start_paused = true)]
async fn late_subscriber_reads_cached_data() {
    let store = QueryStore::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let key = QueryKey::new("buckets");

    let mut first = store.query(key.clone(), counting(&calls, FETCH), QueryOptions::default());
    first.settled().await;
    let late = store.query(key.clone(), counting(&calls, FETCH), QueryOptions::default());

    assert_eq!(count(&calls), 1);
    assert!(!late.is_fetching());
    assert_eq!(late.data().as_deref(), Some(&1));
}

#[tokio::test(start_paused = true)]
async fn invalidation_refetches_each_observed_key_once() {
    let store = QueryStore::default();
    let group_calls = Arc::new(AtomicUsize::new(0));
    let stream_calls = Arc::new(AtomicUsize::new(0));
    let other_calls = Arc::new(AtomicUsize::new(0));

    let groups = QueryKey::new("log-groups").options(&serde_json::json!({"limit": 5}));
    let streams = QueryKey::new("log-groups").segment("/aws/lambda/f");
    let other = QueryKey::new("rest-apis");

    let _g1 = store.query(groups.clone(), counting(&group_calls, FETCH), QueryOptions::default());
    let _g2 = store.query(groups.clone(), counting(&group_calls, FETCH), QueryOptions::default());
    let _s = store.query(streams, counting(&stream_calls, FETCH), QueryOptions::default());
    let _o = store.query(other, counting(&other_calls, FETCH), QueryOptions::default());
    sleep(SETTLE).await;

    store.invalidate(&InvalidationSet::new().with(QueryKey::new("log-groups")));
    sleep(SETTLE).await;

    assert_eq!(count(&group_calls), 2);
    assert_eq!(count(&stream_calls), 2);
    assert_eq!(count(&other_calls), 1);
    assert!(!store.state(&groups).unwrap().stale);
}

#[tokio::test(start_paused = true)]
async fn repeated_invalidations_coalesce() {
    let store = QueryStore::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let key = QueryKey::new("queues");

    let _handle = store.query(key.clone(), counting(&calls, FETCH), QueryOptions::default());
    sleep(SETTLE).await;

    let set = InvalidationSet::new().with(key.clone());
    for _ in 0..5 {
        store.invalidate(&set);
    }
    sleep(SETTLE).await;

    assert_eq!(count(&calls), 2);
}

#[tokio::test(start_paused = true)]
async fn unobserved_entry_is_marked_stale_but_not_refetched() {
    let store = QueryStore::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let key = QueryKey::new("tables");

    let handle = store.query(key.clone(), counting(&calls, FETCH), QueryOptions::default());
    sleep(SETTLE).await;
    drop(handle);

    store.invalidate(&InvalidationSet::new().with(key.clone()));
    sleep(SETTLE).await;

    assert_eq!(count(&calls), 1);
    assert!(store.state(&key).unwrap().stale);

    // Remounting picks up the stale entry.
    let mut again = store.query(key.clone(), counting(&calls, FETCH), QueryOptions::default());
    assert!(again.is_fetching());
    assert!(!again.is_loading());
    again.settled().await;
    assert_eq!(count(&calls), 2);
    assert_eq!(again.data().as_deref(), Some(&2));
}

#[tokio::test(start_paused = true)]
async fn superseded_fetch_result_is_discarded() {
    let store = QueryStore::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let key = QueryKey::new("log-events").segment("/aws/lambda/f");

    let counter = calls.clone();
    let fetch = move || {
        let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
        async move {
            // The first request answers last.
            let delay = if n == 1 { 100 } else { 10 };
            sleep(Duration::from_millis(delay)).await;
            Ok::<_, ClientError>(if n == 1 { "old" } else { "new" })
        }
    };

    let mut handle = store.query(key, fetch, QueryOptions::default());
    handle.refetch();
    sleep(SETTLE).await;

    assert_eq!(count(&calls), 2);
    assert_eq!(handle.data().as_deref(), Some(&"new"));
    assert_eq!(handle.settled().await.status, QueryStatus::Success);
}

#[tokio::test(start_paused = true)]
async fn disabled_handle_never_fetches() {
    let store = QueryStore::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let key = QueryKey::new("access-keys").segment("");

    let mut handle = store.query(key.clone(), counting(&calls, FETCH), QueryOptions::enabled(false));
    sleep(SETTLE).await;
    assert_eq!(count(&calls), 0);
    assert_eq!(handle.status(), QueryStatus::Idle);
    assert!(!handle.is_loading());

    store.invalidate(&InvalidationSet::new().with(QueryKey::new("access-keys")));
    handle.refetch();
    sleep(SETTLE).await;
    assert_eq!(count(&calls), 0);

    handle.set_enabled(true);
    handle.settled().await;
    assert_eq!(count(&calls), 1);
    assert_eq!(handle.data().as_deref(), Some(&1));
}

#[tokio::test(start_paused = true)]
async fn blocked_handle_ignores_set_enabled() {
    let store = QueryStore::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let key = QueryKey::new("access-keys").segment("");

    let mut handle = store.query(
        key,
        counting(&calls, FETCH),
        QueryOptions::enabled(false).blocked(true),
    );
    handle.set_enabled(true);
    handle.refetch();
    sleep(SETTLE).await;

    assert!(!handle.is_enabled());
    assert_eq!(count(&calls), 0);
    assert_eq!(handle.status(), QueryStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn loading_only_on_first_fetch() {
    let store = QueryStore::default();
    let calls = Arc::new(AtomicUsize::new(0));

    let mut handle = store.query(
        QueryKey::new("functions"),
        counting(&calls, FETCH),
        QueryOptions::default(),
    );
    assert!(handle.is_loading());
    assert_eq!(handle.status(), QueryStatus::Loading);
    handle.settled().await;
    assert!(!handle.is_loading());

    handle.refetch();
    assert!(handle.is_fetching());
    assert!(!handle.is_loading());
    assert_eq!(handle.status(), QueryStatus::Success);
    handle.settled().await;
    assert_eq!(handle.data().as_deref(), Some(&2));
    assert!(handle.last_fetched_at().is_some());
}

#[tokio::test(start_paused = true)]
async fn failed_refetch_keeps_previous_data() {
    let store = QueryStore::default();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = calls.clone();
    let fetch = move || {
        let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
        async move {
            if n == 1 {
                Ok(vec!["orders".to_string()])
            } else {
                Err(ClientError::api(500, "Failed to fetch tables"))
            }
        }
    };

    let mut handle = store.query(QueryKey::new("tables"), fetch, QueryOptions::default());
    handle.settled().await;
    handle.refetch();
    let state = handle.settled().await;

    assert_eq!(state.status, QueryStatus::Error);
    assert_eq!(handle.error().unwrap().message(), "Failed to fetch tables");
    assert_eq!(handle.data().unwrap().as_slice(), ["orders".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn polling_runs_while_enabled_and_stops_on_drop() {
    let store = QueryStore::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let period = Duration::from_secs(5);
    let options = QueryOptions::default().with_refetch_interval(period);

    let mut handle = store.query(QueryKey::new("log-tail"), counting(&calls, FETCH), options);
    handle.settled().await;
    assert_eq!(count(&calls), 1);

    sleep(period + SETTLE).await;
    assert_eq!(count(&calls), 2);
    sleep(period).await;
    assert_eq!(count(&calls), 3);

    handle.set_enabled(false);
    sleep(period * 4).await;
    assert_eq!(count(&calls), 3);

    handle.set_enabled(true);
    sleep(period + SETTLE).await;
    assert_eq!(count(&calls), 4);

    drop(handle);
    sleep(period * 4).await;
    assert_eq!(count(&calls), 4);
}

#[tokio::test(start_paused = true)]
async fn unobserved_entries_are_collected_after_gc_time() {
    let store = QueryStore::new(StoreConfig::new().with_gc_time(Duration::from_secs(60)));
    let calls = Arc::new(AtomicUsize::new(0));
    let key = QueryKey::new("secrets");

    let mut handle = store.query(key.clone(), counting(&calls, FETCH), QueryOptions::default());
    handle.settled().await;
    drop(handle);

    sleep(Duration::from_secs(30)).await;
    assert!(store.contains(&key));

    // Remounting inside the window reuses the entry and resets the timer.
    let again = store.query(key.clone(), counting(&calls, FETCH), QueryOptions::default());
    assert_eq!(count(&calls), 1);
    drop(again);

    sleep(Duration::from_secs(31)).await;
    assert!(store.contains(&key));
    sleep(Duration::from_secs(30)).await;
    assert!(!store.contains(&key));
    assert_eq!(store.entry_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn mutation_success_invalidates_and_notifies() {
    let store = QueryStore::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let (notifier, mut toasts) = ChannelNotifier::new();
    let notifier = Arc::new(notifier);

    let _groups = store.query(
        QueryKey::new("log-groups"),
        counting(&calls, FETCH),
        QueryOptions::default(),
    );
    sleep(SETTLE).await;

    let delete: Mutation<String, ()> =
        Mutation::new(store.clone(), notifier.clone(), |_: String| async { Ok(()) })
            .invalidates(|_| InvalidationSet::new().with(QueryKey::new("log-groups")))
            .on_success_message(|_| "Log group deleted".to_string());
    let failing: Mutation<String, ()> =
        Mutation::new(store.clone(), notifier, |name: String| async move {
            Err(ClientError::api(404, format!("Log group {} not found", name)))
        })
        .invalidates(|_| InvalidationSet::new().with(QueryKey::new("log-groups")))
        .on_error_message(|err| format!("Failed to delete log group: {}", err.message()));

    delete.mutate_async("/aws/lambda/f".to_string()).await.unwrap();
    sleep(SETTLE).await;
    assert_eq!(count(&calls), 2);
    let toast = toasts.try_recv().unwrap();
    assert_eq!(toast.level, NotificationLevel::Success);
    assert_eq!(toast.message, "Log group deleted");

    failing.mutate("/aws/lambda/g".to_string());
    sleep(SETTLE).await;
    assert_eq!(count(&calls), 2);
    let toast = toasts.try_recv().unwrap();
    assert_eq!(toast.level, NotificationLevel::Error);
    assert_eq!(
        toast.message,
        "Failed to delete log group: Log group /aws/lambda/g not found"
    );
}
