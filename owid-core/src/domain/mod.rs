pub mod crypto;
pub mod key;
pub mod owid;
pub mod signer;
pub mod status;
pub mod target;

pub use crypto::{CryptoError, CryptoKey, OwidKeyPair};
pub use key::Key;
pub use owid::{Owid, OwidError, OWID_VERSION};
pub use signer::Signer;
pub use status::VerifiedStatus;
pub use target::{OwidTarget, TextTarget};
