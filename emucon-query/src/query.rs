//! Typed query handles.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use emucon_core::ClientError;
use futures_util::FutureExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::key::QueryKey;
use crate::store::{AnyData, EntryState, Fetcher, QueryStatus, QueryStore};

/// Per-subscription options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// A disabled handle never fetches and is skipped by invalidation.
    pub enabled: bool,
    /// Poll while enabled.
    pub refetch_interval: Option<Duration>,
    /// A required input is missing. The handle stays disabled whatever
    /// `set_enabled` is later called with.
    pub blocked: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            refetch_interval: None,
            blocked: false,
        }
    }
}

impl QueryOptions {
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    pub fn with_refetch_interval(mut self, interval: Duration) -> Self {
        self.refetch_interval = Some(interval);
        self
    }

    pub fn blocked(mut self, blocked: bool) -> Self {
        self.blocked = blocked;
        self
    }

    fn effective_enabled(&self) -> bool {
        self.enabled && !self.blocked
    }
}

impl QueryStore {
    /// Subscribe to `key`, registering `fetch` as its fetcher.
    pub fn query<T, F, Fut>(&self, key: QueryKey, fetch: F, options: QueryOptions) -> QueryHandle<T>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let fetcher: Fetcher = Arc::new(move || {
            fetch()
                .map(|result| result.map(|value| Arc::new(value) as AnyData))
                .boxed()
        });
        let enabled = options.effective_enabled();
        let rx = self.subscribe(&key, fetcher, enabled);
        let mut handle = QueryHandle {
            store: self.clone(),
            key,
            rx,
            enabled,
            blocked: options.blocked,
            refetch_interval: options.refetch_interval,
            poller: None,
            _marker: PhantomData,
        };
        handle.start_polling();
        handle
    }
}

/// A mounted subscription to one key. Dropping it unsubscribes and stops
/// polling.
pub struct QueryHandle<T> {
    store: QueryStore,
    key: QueryKey,
    rx: watch::Receiver<EntryState>,
    enabled: bool,
    blocked: bool,
    refetch_interval: Option<Duration>,
    poller: Option<JoinHandle<()>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> QueryHandle<T> {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    pub fn state(&self) -> EntryState {
        self.rx.borrow().clone()
    }

    pub fn data(&self) -> Option<Arc<T>> {
        self.rx.borrow().data::<T>()
    }

    pub fn status(&self) -> QueryStatus {
        self.rx.borrow().status
    }

    /// First load only: a fetch is running and nothing is cached yet.
    pub fn is_loading(&self) -> bool {
        let state = self.rx.borrow();
        state.is_fetching && !state.has_data()
    }

    pub fn is_fetching(&self) -> bool {
        self.rx.borrow().is_fetching
    }

    pub fn is_stale(&self) -> bool {
        self.rx.borrow().stale
    }

    pub fn error(&self) -> Option<ClientError> {
        self.rx.borrow().error.clone()
    }

    pub fn last_fetched_at(&self) -> Option<DateTime<Utc>> {
        self.rx.borrow().last_fetched_at
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start a fetch now, superseding one in flight. No-op while disabled.
    pub fn refetch(&self) {
        if self.enabled {
            self.store.refetch(&self.key);
        }
    }

    /// Ignored while the handle is blocked on a missing input.
    pub fn set_enabled(&mut self, enabled: bool) {
        let enabled = enabled && !self.blocked;
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        self.store.set_enabled(&self.key, enabled);
        if enabled {
            self.start_polling();
        } else {
            self.stop_polling();
        }
    }

    /// Wait for the next state change. Returns `false` if the entry is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Wait until no fetch is in flight.
    pub async fn settled(&mut self) -> EntryState {
        if let Ok(state) = self.rx.wait_for(|s| !s.is_fetching).await {
            return state.clone();
        }
        self.rx.borrow().clone()
    }
}

impl<T> QueryHandle<T> {
    fn start_polling(&mut self) {
        let Some(period) = self.refetch_interval else {
            return;
        };
        if !self.enabled || self.poller.is_some() {
            return;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let store = self.store.clone();
        let key = self.key.clone();
        self.poller = Some(runtime.spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                store.poll(&key);
            }
        }));
    }

    fn stop_polling(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.abort();
        }
    }
}

impl<T> Drop for QueryHandle<T> {
    fn drop(&mut self) {
        self.stop_polling();
        self.store.unsubscribe(&self.key, self.enabled);
    }
}

impl<T> std::fmt::Debug for QueryHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryHandle")
            .field("key", &self.key)
            .field("enabled", &self.enabled)
            .field("blocked", &self.blocked)
            .field("refetch_interval", &self.refetch_interval)
            .field("state", &*self.rx.borrow())
            .finish()
    }
}
