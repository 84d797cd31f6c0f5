//! Store configuration.

use std::time::Duration;

/// Configuration for the query store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// How long an entry without observers is kept before removal.
    pub gc_time: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            gc_time: Duration::from_secs(300), // 5 minutes
        }
    }
}

impl StoreConfig {
    /// Create a new store config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inactivity window before unobserved entries are dropped.
    pub fn with_gc_time(mut self, gc_time: Duration) -> Self {
        self.gc_time = gc_time;
        self
    }
}
