//! The keyed query store.
//!
//! Entries live in a map behind a `std::sync::Mutex` that is never held
//! across an `.await`. Every fetch runs as a spawned task tagged with the
//! entry's next sequence number; a completion commits only if its sequence
//! is still the latest one started for that key, which is how superseded
//! and out-of-order responses are dropped. Observers are woken through a
//! per-entry `watch` channel.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use emucon_core::ClientError;
use futures_util::future::BoxFuture;
use tokio::sync::watch;

use crate::config::StoreConfig;
use crate::invalidation::InvalidationSet;
use crate::key::QueryKey;

pub(crate) type AnyData = Arc<dyn Any + Send + Sync>;
pub(crate) type FetchResult = Result<AnyData, ClientError>;
pub(crate) type Fetcher = Arc<dyn Fn() -> BoxFuture<'static, FetchResult> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Observable state of one cache entry.
#[derive(Clone, Default)]
pub struct EntryState {
    pub status: QueryStatus,
    pub(crate) data: Option<AnyData>,
    pub error: Option<ClientError>,
    pub last_fetched_at: Option<DateTime<Utc>>,
    pub is_fetching: bool,
    pub stale: bool,
}

impl EntryState {
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// Typed view of the cached value.
    pub fn data<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.data.clone()?.downcast::<T>().ok()
    }

    fn needs_fetch(&self) -> bool {
        !self.is_fetching && (self.stale || self.data.is_none())
    }
}

impl fmt::Debug for EntryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryState")
            .field("status", &self.status)
            .field("has_data", &self.data.is_some())
            .field("error", &self.error)
            .field("last_fetched_at", &self.last_fetched_at)
            .field("is_fetching", &self.is_fetching)
            .field("stale", &self.stale)
            .finish()
    }
}

struct Entry {
    state: watch::Sender<EntryState>,
    fetcher: Option<Fetcher>,
    /// Sequence of the latest fetch started for this key.
    seq: u64,
    observers: usize,
    enabled_observers: usize,
    refetch_scheduled: bool,
    gc_generation: u64,
}

impl Entry {
    fn new() -> Self {
        let (state, _) = watch::channel(EntryState::default());
        Self {
            state,
            fetcher: None,
            seq: 0,
            observers: 0,
            enabled_observers: 0,
            refetch_scheduled: false,
            gc_generation: 0,
        }
    }
}

struct StoreInner {
    entries: Mutex<HashMap<QueryKey, Entry>>,
    config: StoreConfig,
}

/// Process-wide query cache. Cheap to clone.
#[derive(Clone)]
pub struct QueryStore {
    inner: Arc<StoreInner>,
}

impl fmt::Debug for QueryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryStore")
            .field("entries", &self.entry_count())
            .field("config", &self.inner.config)
            .finish()
    }
}

impl Default for QueryStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl QueryStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                entries: Mutex::new(HashMap::new()),
                config,
            }),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<QueryKey, Entry>> {
        self.inner.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register an observer of `key`. Starts a fetch when the observer is
    /// enabled and the entry has no fresh data and none in flight.
    pub(crate) fn subscribe(
        &self,
        key: &QueryKey,
        fetcher: Fetcher,
        enabled: bool,
    ) -> watch::Receiver<EntryState> {
        let mut entries = self.entries();
        let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
        entry.fetcher = Some(fetcher);
        entry.observers += 1;
        entry.gc_generation += 1;
        if enabled {
            entry.enabled_observers += 1;
            if entry.state.borrow().needs_fetch() {
                self.start_fetch(key, entry);
            }
        }
        entry.state.subscribe()
    }

    pub(crate) fn unsubscribe(&self, key: &QueryKey, enabled: bool) {
        let mut entries = self.entries();
        let Some(entry) = entries.get_mut(key) else {
            return;
        };
        entry.observers = entry.observers.saturating_sub(1);
        if enabled {
            entry.enabled_observers = entry.enabled_observers.saturating_sub(1);
        }
        if entry.observers == 0 {
            entry.gc_generation += 1;
            self.schedule_gc(key.clone(), entry.gc_generation);
        }
    }

    /// Move one observer between enabled and disabled.
    pub(crate) fn set_enabled(&self, key: &QueryKey, enabled: bool) {
        let mut entries = self.entries();
        let Some(entry) = entries.get_mut(key) else {
            return;
        };
        if enabled {
            entry.enabled_observers += 1;
            if entry.state.borrow().needs_fetch() {
                self.start_fetch(key, entry);
            }
        } else {
            entry.enabled_observers = entry.enabled_observers.saturating_sub(1);
        }
    }

    /// Start a new fetch for `key`, superseding any in flight.
    pub fn refetch(&self, key: &QueryKey) {
        let mut entries = self.entries();
        if let Some(entry) = entries.get_mut(key) {
            self.start_fetch(key, entry);
        }
    }

    /// Polling tick: fetch unless one is already in flight.
    pub(crate) fn poll(&self, key: &QueryKey) {
        let mut entries = self.entries();
        if let Some(entry) = entries.get_mut(key) {
            if entry.enabled_observers > 0 && !entry.state.borrow().is_fetching {
                self.start_fetch(key, entry);
            }
        }
    }

    /// Mark every entry in `set` stale and schedule one refetch per matching
    /// key that has an enabled observer. Invalidations issued before that
    /// refetch starts collapse into it.
    pub fn invalidate(&self, set: &InvalidationSet) {
        let mut scheduled = Vec::new();
        {
            let mut entries = self.entries();
            for (key, entry) in entries.iter_mut().filter(|(key, _)| set.matches(key)) {
                entry.state.send_modify(|s| s.stale = true);
                if entry.enabled_observers > 0 && !entry.refetch_scheduled {
                    entry.refetch_scheduled = true;
                    scheduled.push(key.clone());
                }
            }
        }
        tracing::debug!(
            families = set.families().len(),
            refetches = scheduled.len(),
            "invalidated queries"
        );

        for key in scheduled {
            let store = self.clone();
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(async move {
                        tokio::task::yield_now().await;
                        store.run_scheduled_refetch(&key);
                    });
                }
                Err(_) => store.run_scheduled_refetch(&key),
            }
        }
    }

    fn run_scheduled_refetch(&self, key: &QueryKey) {
        let mut entries = self.entries();
        if let Some(entry) = entries.get_mut(key) {
            entry.refetch_scheduled = false;
            if entry.enabled_observers > 0 {
                self.start_fetch(key, entry);
            }
        }
    }

    fn start_fetch(&self, key: &QueryKey, entry: &mut Entry) {
        let Some(fetcher) = entry.fetcher.clone() else {
            return;
        };
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(key = %key, "no async runtime, fetch skipped");
            return;
        };

        entry.seq += 1;
        let seq = entry.seq;
        entry.state.send_modify(|s| {
            s.is_fetching = true;
            if s.data.is_none() {
                s.status = QueryStatus::Loading;
            }
        });
        tracing::trace!(key = %key, seq, "fetch started");

        let fetch = fetcher();
        let store = self.clone();
        let key = key.clone();
        handle.spawn(async move {
            let result = fetch.await;
            store.complete(&key, seq, result);
        });
    }

    fn complete(&self, key: &QueryKey, seq: u64, result: FetchResult) {
        let mut entries = self.entries();
        let Some(entry) = entries.get_mut(key) else {
            tracing::trace!(key = %key, seq, "discarding fetch for removed entry");
            return;
        };
        if seq != entry.seq {
            tracing::trace!(key = %key, seq, latest = entry.seq, "discarding superseded fetch");
            return;
        }

        entry.state.send_modify(|s| {
            s.is_fetching = false;
            s.stale = false;
            match result {
                Ok(data) => {
                    s.data = Some(data);
                    s.error = None;
                    s.status = QueryStatus::Success;
                    s.last_fetched_at = Some(Utc::now());
                }
                Err(err) => {
                    tracing::debug!(key = %key, error = %err, "fetch failed");
                    s.error = Some(err);
                    s.status = QueryStatus::Error;
                }
            }
        });
    }

    fn schedule_gc(&self, key: QueryKey, generation: u64) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let store = self.clone();
        let gc_time = self.inner.config.gc_time;
        handle.spawn(async move {
            tokio::time::sleep(gc_time).await;
            let mut entries = store.entries();
            let expired = entries
                .get(&key)
                .is_some_and(|e| e.observers == 0 && e.gc_generation == generation);
            if expired {
                entries.remove(&key);
                tracing::trace!(key = %key, "collected unobserved entry");
            }
        });
    }

    /// Snapshot of one entry, if present.
    pub fn state(&self, key: &QueryKey) -> Option<EntryState> {
        self.entries().get(key).map(|e| e.state.borrow().clone())
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries().contains_key(key)
    }

    pub fn entry_count(&self) -> usize {
        self.entries().len()
    }

    pub fn observer_count(&self, key: &QueryKey) -> usize {
        self.entries().get(key).map(|e| e.observers).unwrap_or(0)
    }

    /// Keys currently cached, sorted.
    pub fn keys(&self) -> Vec<QueryKey> {
        let mut keys: Vec<_> = self.entries().keys().cloned().collect();
        keys.sort();
        keys
    }
}
