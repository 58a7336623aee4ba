//! Signer descriptor: a domain-identified entity and its key history.

use serde::{Deserialize, Serialize};

use crate::domain::key::Key;

/// Describes a signer: format version, owning domain, human-readable
/// metadata and the ordered key history.
///
/// `public_keys` must be non-empty for verification to be possible;
/// `private_keys` is only ever populated locally and is required only for
/// signing. The serialized form matches the signer endpoint JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signer {
    pub version: u8,
    pub domain: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "termsURL")]
    pub terms_url: String,
    #[serde(rename = "publicKeys")]
    pub public_keys: Vec<Key>,
    #[serde(rename = "privateKeys", default, skip_serializing_if = "Vec::is_empty")]
    pub private_keys: Vec<Key>,
}

impl Signer {
    /// The newest private key by creation time. Ties keep the earliest
    /// list entry.
    pub fn newest_private_key(&self) -> Option<&Key> {
        let mut newest: Option<&Key> = None;
        for key in &self.private_keys {
            match newest {
                Some(current) if key.created() > current.created() => newest = Some(key),
                None => newest = Some(key),
                _ => {}
            }
        }
        newest
    }
}
