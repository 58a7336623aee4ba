//! Verification status taxonomy.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of an OWID verification attempt.
///
/// `NotStarted` and `Processing` are transient; the remaining values are
/// terminal. Signature mismatch, a missing signer and the absence of a
/// time-eligible key are ordinary terminal outcomes, never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifiedStatus {
    NotStarted,
    Processing,
    Valid,
    NotValid,
    SignerNotFound,
    KeyNotFound,
    Exception,
}

impl VerifiedStatus {
    /// True once a verification pass has reached a terminal outcome.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, VerifiedStatus::NotStarted | VerifiedStatus::Processing)
    }
}

impl fmt::Display for VerifiedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifiedStatus::NotStarted => write!(f, "not_started"),
            VerifiedStatus::Processing => write!(f, "processing"),
            VerifiedStatus::Valid => write!(f, "valid"),
            VerifiedStatus::NotValid => write!(f, "not_valid"),
            VerifiedStatus::SignerNotFound => write!(f, "signer_not_found"),
            VerifiedStatus::KeyNotFound => write!(f, "key_not_found"),
            VerifiedStatus::Exception => write!(f, "exception"),
        }
    }
}
