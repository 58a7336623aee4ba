pub mod signer_resolver;

pub use signer_resolver::{SignerQuery, SignerResolver, SignerResolverError};
