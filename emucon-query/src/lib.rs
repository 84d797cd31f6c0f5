//! EMUCON Query - Keyed Query Cache
//!
//! Sits between the console views and the resource client:
//!
//! - [`QueryStore`] caches one entry per [`QueryKey`], shares in-flight
//!   fetches between subscribers and discards out-of-order completions.
//! - [`QueryHandle`] is a mounted subscription; dropping it unsubscribes.
//! - [`Mutation`] runs a write and then applies its [`InvalidationSet`],
//!   which marks matching entries stale and refetches the observed ones.
//! - [`Notifier`] carries the resulting success and error toasts.
//!
//! Everything is in memory. One store is created per process and shared by
//! clone.

pub mod config;
pub mod invalidation;
pub mod key;
pub mod mutation;
pub mod notify;
pub mod query;
pub mod store;

pub use config::StoreConfig;
pub use invalidation::InvalidationSet;
pub use key::QueryKey;
pub use mutation::{Mutation, MutationStatus};
pub use notify::{ChannelNotifier, Notification, NotificationLevel, Notifier, NullNotifier};
pub use query::{QueryHandle, QueryOptions};
pub use store::{EntryState, QueryStatus, QueryStore};
