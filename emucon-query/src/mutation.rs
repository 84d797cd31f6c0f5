//! Mutations: one client write, then invalidation and a toast.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use emucon_core::ClientError;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::invalidation::InvalidationSet;
use crate::notify::Notifier;
use crate::store::QueryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

type Run<I, O> = Arc<dyn Fn(I) -> BoxFuture<'static, Result<O, ClientError>> + Send + Sync>;
type Invalidates<I> = Arc<dyn Fn(&I) -> InvalidationSet + Send + Sync>;
type SuccessMessage<I> = Arc<dyn Fn(&I) -> String + Send + Sync>;
type ErrorMessage = Arc<dyn Fn(&ClientError) -> String + Send + Sync>;

/// A write against the proxy. Not cached; each call is independent and
/// `status` reflects the most recent one to finish.
pub struct Mutation<I, O> {
    store: QueryStore,
    notifier: Arc<dyn Notifier>,
    run: Run<I, O>,
    invalidates: Invalidates<I>,
    success_message: Option<SuccessMessage<I>>,
    error_message: ErrorMessage,
    pending: Arc<AtomicUsize>,
    status: Arc<Mutex<MutationStatus>>,
}

impl<I, O> Clone for Mutation<I, O> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            notifier: self.notifier.clone(),
            run: self.run.clone(),
            invalidates: self.invalidates.clone(),
            success_message: self.success_message.clone(),
            error_message: self.error_message.clone(),
            pending: self.pending.clone(),
            status: self.status.clone(),
        }
    }
}

impl<I, O> Mutation<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    pub fn new<F, Fut>(store: QueryStore, notifier: Arc<dyn Notifier>, run: F) -> Self
    where
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, ClientError>> + Send + 'static,
    {
        Self {
            store,
            notifier,
            run: Arc::new(move |input: I| run(input).boxed()),
            invalidates: Arc::new(|_: &I| InvalidationSet::new()),
            success_message: None,
            error_message: Arc::new(|err: &ClientError| err.message().to_string()),
            pending: Arc::new(AtomicUsize::new(0)),
            status: Arc::new(Mutex::new(MutationStatus::Idle)),
        }
    }

    /// Key families to invalidate after success, derived from the input.
    pub fn invalidates(mut self, f: impl Fn(&I) -> InvalidationSet + Send + Sync + 'static) -> Self {
        self.invalidates = Arc::new(f);
        self
    }

    pub fn on_success_message(mut self, f: impl Fn(&I) -> String + Send + Sync + 'static) -> Self {
        self.success_message = Some(Arc::new(f));
        self
    }

    pub fn on_error_message(
        mut self,
        f: impl Fn(&ClientError) -> String + Send + Sync + 'static,
    ) -> Self {
        self.error_message = Arc::new(f);
        self
    }

    pub fn status(&self) -> MutationStatus {
        *self.status.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }

    fn set_status(&self, status: MutationStatus) {
        *self.status.lock().unwrap_or_else(|e| e.into_inner()) = status;
    }

    /// Run the write. Success applies the invalidation set and emits a
    /// success toast; failure emits an error toast and invalidates nothing.
    pub async fn mutate_async(&self, input: I) -> Result<O, ClientError> {
        let invalidation = (self.invalidates)(&input);
        let success = self.success_message.as_ref().map(|f| f(&input));

        let pending = PendingGuard::enter(&self.pending, &self.status);
        let result = (self.run)(input).await;
        pending.finish();

        match &result {
            Ok(_) => {
                self.set_status(MutationStatus::Success);
                self.store.invalidate(&invalidation);
                if let Some(message) = success {
                    self.notifier.success(&message);
                }
            }
            Err(err) => {
                self.set_status(MutationStatus::Error);
                tracing::warn!(error = %err, "mutation failed");
                self.notifier.error(&(self.error_message)(err));
            }
        }
        result
    }

    /// Fire and forget; the outcome only reaches the user as a toast.
    pub fn mutate(&self, input: I) {
        let this = self.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    let _ = this.mutate_async(input).await;
                });
            }
            Err(_) => tracing::warn!("no async runtime, mutation dropped"),
        }
    }
}

/// Counts one in-flight write. If the caller drops the future before the
/// write finishes, the count is released and a `Pending` status left by
/// this call falls back to `Idle`.
struct PendingGuard {
    pending: Arc<AtomicUsize>,
    status: Arc<Mutex<MutationStatus>>,
    finished: bool,
}

impl PendingGuard {
    fn enter(pending: &Arc<AtomicUsize>, status: &Arc<Mutex<MutationStatus>>) -> Self {
        pending.fetch_add(1, Ordering::SeqCst);
        *status.lock().unwrap_or_else(|e| e.into_inner()) = MutationStatus::Pending;
        Self {
            pending: pending.clone(),
            status: status.clone(),
            finished: false,
        }
    }

    fn finish(mut self) {
        self.finished = true;
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        let remaining = self.pending.fetch_sub(1, Ordering::SeqCst) - 1;
        if self.finished || remaining > 0 {
            return;
        }
        tracing::debug!("mutation dropped before completion");
        let mut status = self.status.lock().unwrap_or_else(|e| e.into_inner());
        if *status == MutationStatus::Pending {
            *status = MutationStatus::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{ChannelNotifier, NotificationLevel};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_write_releases_pending() {
        let store = QueryStore::default();
        let (notifier, mut rx) = ChannelNotifier::new();
        let mutation: Mutation<(), ()> = Mutation::new(store, Arc::new(notifier), |_: ()| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(())
        });

        let outcome =
            tokio::time::timeout(Duration::from_millis(10), mutation.mutate_async(())).await;
        assert!(outcome.is_err());
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert!(!mutation.is_pending());
        assert_eq!(mutation.status(), MutationStatus::Idle);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_write_keeps_other_call_pending() {
        let store = QueryStore::default();
        let (notifier, _rx) = ChannelNotifier::new();
        let mutation: Mutation<u64, ()> =
            Mutation::new(store, Arc::new(notifier), |secs: u64| async move {
                tokio::time::sleep(Duration::from_secs(secs)).await;
                Ok(())
            });

        let slow = tokio::spawn({
            let mutation = mutation.clone();
            async move { mutation.mutate_async(5).await }
        });
        tokio::task::yield_now().await;
        let _ = tokio::time::timeout(Duration::from_millis(10), mutation.mutate_async(10)).await;

        assert!(mutation.is_pending());
        assert_eq!(mutation.status(), MutationStatus::Pending);
        slow.await.unwrap().unwrap();
        assert!(!mutation.is_pending());
        assert_eq!(mutation.status(), MutationStatus::Success);
    }

    #[tokio::test]
    async fn test_failed_mutation_reports_error_and_status() {
        let store = QueryStore::default();
        let (notifier, mut rx) = ChannelNotifier::new();
        let mutation: Mutation<String, ()> =
            Mutation::new(store, Arc::new(notifier), |name: String| async move {
                Err(ClientError::api(409, format!("{} already exists", name)))
            })
            .on_error_message(|err| format!("Failed to create queue: {}", err));

        let err = mutation.mutate_async("jobs".to_string()).await.unwrap_err();

        assert_eq!(err.message(), "jobs already exists");
        assert_eq!(mutation.status(), MutationStatus::Error);
        assert!(!mutation.is_pending());
        let toast = rx.try_recv().unwrap();
        assert_eq!(toast.level, NotificationLevel::Error);
        assert_eq!(toast.message, "Failed to create queue: jobs already exists");
    }

    #[tokio::test]
    async fn test_success_without_message_emits_nothing() {
        let store = QueryStore::default();
        let (notifier, mut rx) = ChannelNotifier::new();
        let mutation: Mutation<u32, u32> =
            Mutation::new(store, Arc::new(notifier), |n: u32| async move { Ok(n * 2) });

        assert_eq!(mutation.status(), MutationStatus::Idle);
        assert_eq!(mutation.mutate_async(21).await.unwrap(), 42);
        assert_eq!(mutation.status(), MutationStatus::Success);
        assert!(rx.try_recv().is_err());
    }
}
