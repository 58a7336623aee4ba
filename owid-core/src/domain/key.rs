//! Key material: a PEM-encoded key and its creation time.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::crypto::{CryptoError, CryptoKey};

/// A PEM-encoded key (public or private) together with the instant it was
/// created, used for time-based key selection.
///
/// The usable crypto key is materialized lazily on first use and cached;
/// the cache is write-once, and replacing the PEM drops it. On the wire a
/// key serializes as `{"pem": ..., "created": <RFC 3339>}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Key {
    pem: String,
    created: DateTime<Utc>,
    #[serde(skip)]
    crypto: OnceLock<CryptoKey>,
}

impl Key {
    pub fn new(pem: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            pem: pem.into(),
            created,
            crypto: OnceLock::new(),
        }
    }

    pub fn pem(&self) -> &str {
        &self.pem
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Replaces the PEM material, dropping any cached crypto key.
    pub fn set_pem(&mut self, pem: impl Into<String>) {
        self.pem = pem.into();
        self.crypto = OnceLock::new();
    }

    /// Materializes the usable crypto key from the PEM text.
    ///
    /// The first successful materialization wins; concurrent callers may
    /// race benignly since PEM import is deterministic.
    pub fn crypto_key(&self) -> Result<&CryptoKey, CryptoError> {
        if let Some(key) = self.crypto.get() {
            return Ok(key);
        }
        let key = CryptoKey::from_pem(&self.pem)?;
        Ok(self.crypto.get_or_init(|| key))
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.pem == other.pem && self.created == other.created
    }
}
