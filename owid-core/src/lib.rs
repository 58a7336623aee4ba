//! Open Web Id (OWID): portable, cryptographically attested identifiers.
//!
//! An OWID binds caller-supplied payload bytes to a signer (identified by a
//! DNS domain), a timestamp and a format version, producing a compact
//! self-verifying byte string. Any party that can fetch the signer's public
//! keys from the domain can verify it without trusting an intermediary.
//!
//! - [`domain`] holds the core types and the sign/verify state machine.
//! - [`common`] holds the wire codecs (bytes and time).
//! - [`port`] defines signer resolution; [`infrastructure`] provides the
//!   in-memory and HTTP resolver implementations.

pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod port;

pub use domain::*;
pub use port::*;

pub use infrastructure::{HttpResolverConfig, HttpSignerResolver, InMemorySignerStore};
