//! Per-key deduplication of concurrent lookups.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::OnceCell;

/// A map that collapses concurrent fetches for the same key into one.
///
/// Each key owns a write-once slot. The first caller runs its fetch while
/// late callers await the in-flight result; everyone receives a clone of
/// the same value. Results are kept for the lifetime of the map. A failed
/// fetch leaves the slot empty, so a later call retries; nothing is
/// written on failure.
pub struct CoalescingMap<V> {
    cells: Mutex<HashMap<String, Arc<OnceCell<V>>>>,
}

impl<V> CoalescingMap<V> {
    pub fn new() -> Self {
        Self {
            cells: Mutex::new(HashMap::new()),
        }
    }

    fn cell(&self, key: &str) -> Arc<OnceCell<V>> {
        let mut guard = match self.cells.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }
}

impl<V: Clone> CoalescingMap<V> {
    /// Returns the cached value for `key`, or runs `fetch` to produce it.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let cell = self.cell(key);
        let value = cell.get_or_try_init(fetch).await?;
        Ok(value.clone())
    }
}

impl<V> Default for CoalescingMap<V> {
    fn default() -> Self {
        Self::new()
    }
}
