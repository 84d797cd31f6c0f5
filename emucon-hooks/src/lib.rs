//! EMUCON Hooks - Per-Resource Queries and Mutations
//!
//! [`Hooks`] binds the resource client to the query store. Each read
//! endpoint gets a `use_*` constructor returning a [`QueryHandle`]; each
//! write endpoint gets a `use_*` constructor returning a [`Mutation`] wired
//! to its [`Write`] invalidation and its toast messages.
//!
//! Query constructors take the resource identifiers, an options struct and
//! an `enabled` flag. A blank identifier forces the query off.

pub mod invalidation;
pub mod keys;
pub mod services;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use emucon_client::RestClient;
use emucon_core::{ClientError, ClientResult};
use emucon_query::{Mutation, Notifier, QueryHandle, QueryKey, QueryOptions, QueryStore};

pub use invalidation::Write;

/// Tail-mode log events refetch every five seconds.
pub const DEFAULT_LOG_TAIL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HooksConfig {
    pub log_tail_interval: Duration,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            log_tail_interval: DEFAULT_LOG_TAIL_INTERVAL,
        }
    }
}

impl HooksConfig {
    pub fn with_log_tail_interval(mut self, interval: Duration) -> Self {
        self.log_tail_interval = interval;
        self
    }
}

/// Toast text for one mutation. Failures render as `"{failure}: {error}"`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Messages {
    success: &'static str,
    failure: &'static str,
}

impl Messages {
    pub(crate) const fn new(success: &'static str, failure: &'static str) -> Self {
        Self { success, failure }
    }
}

/// Shared data-access context. Created once per process; clones share the
/// same store, client and notifier.
#[derive(Clone)]
pub struct Hooks {
    store: QueryStore,
    client: Arc<RestClient>,
    notifier: Arc<dyn Notifier>,
    config: HooksConfig,
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("base_url", &self.client.base_url())
            .field("store", &self.store)
            .field("config", &self.config)
            .finish()
    }
}

impl Hooks {
    pub fn new(store: QueryStore, client: RestClient, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_config(store, client, notifier, HooksConfig::default())
    }

    pub fn with_config(
        store: QueryStore,
        client: RestClient,
        notifier: Arc<dyn Notifier>,
        config: HooksConfig,
    ) -> Self {
        tracing::debug!(base_url = client.base_url(), "hooks initialised");
        Self {
            store,
            client: Arc::new(client),
            notifier,
            config,
        }
    }

    pub fn store(&self) -> &QueryStore {
        &self.store
    }

    pub fn client(&self) -> &RestClient {
        &self.client
    }

    pub fn config(&self) -> &HooksConfig {
        &self.config
    }

    pub(crate) fn query<T, F, Fut>(&self, key: QueryKey, options: QueryOptions, fetch: F) -> QueryHandle<T>
    where
        T: Send + Sync + 'static,
        F: Fn(Arc<RestClient>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
    {
        let client = self.client.clone();
        self.store.query(key, move || fetch(client.clone()), options)
    }

    pub(crate) fn mutation<I, O, F, Fut>(
        &self,
        messages: Messages,
        write: impl Fn(&I) -> Write + Send + Sync + 'static,
        run: F,
    ) -> Mutation<I, O>
    where
        I: Send + 'static,
        O: Send + 'static,
        F: Fn(Arc<RestClient>, I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ClientResult<O>> + Send + 'static,
    {
        let client = self.client.clone();
        Mutation::new(self.store.clone(), self.notifier.clone(), move |input: I| {
            run(client.clone(), input)
        })
        .invalidates(move |input: &I| write(input).invalidation())
        .on_success_message(move |_: &I| messages.success.to_string())
        .on_error_message(move |err: &ClientError| format!("{}: {}", messages.failure, err.message()))
    }
}

/// `enabled` narrowed by identifier presence. A blank identifier blocks the
/// handle for its whole life.
pub(crate) fn gate(enabled: bool, identifiers: &[&str]) -> QueryOptions {
    let missing = identifiers.iter().any(|id| id.trim().is_empty());
    QueryOptions::enabled(enabled && !missing).blocked(missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_identifier_disables_query() {
        assert!(gate(true, &["orders"]).enabled);
        assert!(!gate(true, &["orders", " "]).enabled);
        assert!(!gate(false, &["orders"]).enabled);
        assert!(gate(true, &[]).enabled);
        assert!(gate(false, &[""]).blocked);
        assert!(!gate(false, &["orders"]).blocked);
    }

    #[test]
    fn test_default_tail_interval() {
        assert_eq!(HooksConfig::default().log_tail_interval, Duration::from_secs(5));
    }
}
