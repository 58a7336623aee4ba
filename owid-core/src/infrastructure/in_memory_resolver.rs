//! In-memory signer resolution for tests, PoCs and local setups.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::signer::Signer;
use crate::port::signer_resolver::{SignerQuery, SignerResolver, SignerResolverError};

/// Map-backed signer store.
///
/// Entries are keyed by the structural `(version, domain)` composite key.
/// An optional synthetic delay suspends every lookup for the configured
/// duration, for latency modelling in tests. Not persisted; entries live
/// for the lifetime of the process.
#[derive(Clone, Default)]
pub struct InMemorySignerStore {
    inner: Arc<Mutex<HashMap<String, Arc<Signer>>>>,
    delay: Option<Duration>,
}

impl InMemorySignerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose lookups suspend for `delay` before responding.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            inner: Arc::default(),
            delay: Some(delay),
        }
    }

    /// Registers `signer` under its own `(version, domain)` key and
    /// returns the shared entry.
    pub fn insert(&self, signer: Signer) -> Arc<Signer> {
        let entry = Arc::new(signer);
        let key = SignerQuery::new(entry.version, entry.domain.clone()).cache_key();
        if let Ok(mut guard) = self.inner.lock() {
            guard.insert(key, Arc::clone(&entry));
        }
        entry
    }
}

#[async_trait]
impl SignerResolver for InMemorySignerStore {
    async fn get(&self, query: &SignerQuery) -> Result<Option<Arc<Signer>>, SignerResolverError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let guard = self
            .inner
            .lock()
            .map_err(|e| SignerResolverError::FetchFailed {
                reason: e.to_string(),
            })?;

        Ok(guard.get(&query.cache_key()).cloned())
    }
}
