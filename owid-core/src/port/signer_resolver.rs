//! Signer resolution port.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::signer::Signer;

/// Structural lookup key for signer resolution.
///
/// Equality is over the `(version, domain)` fields, never object identity;
/// a freshly constructed query with equal fields finds the cached entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignerQuery {
    version: u8,
    domain: String,
}

impl SignerQuery {
    pub fn new(version: u8, domain: impl Into<String>) -> Self {
        Self {
            version,
            domain: domain.into(),
        }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Composite string key used by resolver caches.
    pub fn cache_key(&self) -> String {
        format!("v{}|{}", self.version, self.domain)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SignerResolverError {
    #[error("signer fetch failed: {reason}")]
    FetchFailed { reason: String },

    #[error("signer fetch returned HTTP status {status}")]
    HttpStatus { status: u16 },

    #[error("signer resolution deadline exceeded")]
    Cancelled,
}

/// Resolves `(version, domain)` to signer metadata.
///
/// `Ok(None)` means the signer is genuinely unknown, an ordinary outcome.
/// Implementations must be safe for concurrent `get` calls.
#[async_trait]
pub trait SignerResolver: Send + Sync {
    async fn get(&self, query: &SignerQuery) -> Result<Option<Arc<Signer>>, SignerResolverError>;
}
