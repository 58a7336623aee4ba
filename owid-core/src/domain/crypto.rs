//! ECDSA P-256 / SHA-256 facade.
//!
//! Signatures are the raw 64-byte `r||s` concatenation, not DER. Keys move
//! between processes as PEM: SPKI (`BEGIN PUBLIC KEY`) for verification,
//! PKCS#8 (`BEGIN PRIVATE KEY`) for signing. The importer selects the key
//! kind from the PEM marker alone.

use std::fmt;

use p256::ecdsa::signature::{Signer, Verifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::elliptic_curve::rand_core::OsRng;
use p256::pkcs8::{
    DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding,
};
use thiserror::Error;

use crate::common::io::SIGNATURE_LENGTH;

const PRIVATE_KEY_MARKER: &str = "PRIVATE KEY";
const PUBLIC_KEY_MARKER: &str = "PUBLIC KEY";

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("key does not support {0}")]
    KeyMisuse(&'static str),

    #[error("invalid PEM key material: {0}")]
    InvalidPem(String),

    #[error("signing failed: {0}")]
    Signing(String),
}

/// A freshly generated ECDSA P-256 keypair.
#[derive(Clone)]
pub struct OwidKeyPair {
    secret_key: SigningKey,
    public_key: VerifyingKey,
}

impl OwidKeyPair {
    pub fn generate() -> Self {
        let secret_key = SigningKey::random(&mut OsRng);
        let public_key = VerifyingKey::from(&secret_key);
        OwidKeyPair {
            secret_key,
            public_key,
        }
    }

    pub fn secret_key(&self) -> &SigningKey {
        &self.secret_key
    }

    pub fn public_key(&self) -> &VerifyingKey {
        &self.public_key
    }

    /// The private half as a sign-capable [`CryptoKey`].
    pub fn signing_key(&self) -> CryptoKey {
        CryptoKey::Signing(self.secret_key.clone())
    }

    /// The public half as a verify-capable [`CryptoKey`].
    pub fn verifying_key(&self) -> CryptoKey {
        CryptoKey::Verifying(self.public_key)
    }

    pub fn public_key_pem(&self) -> Result<String, CryptoError> {
        self.verifying_key().to_pem()
    }

    pub fn private_key_pem(&self) -> Result<String, CryptoError> {
        self.signing_key().to_pem()
    }
}

/// A usable crypto key with exactly one capability: sign or verify.
#[derive(Clone)]
pub enum CryptoKey {
    Signing(SigningKey),
    Verifying(VerifyingKey),
}

impl CryptoKey {
    /// Imports a key from PEM, selecting the kind from the marker alone.
    pub fn from_pem(pem: &str) -> Result<Self, CryptoError> {
        if pem.contains(PRIVATE_KEY_MARKER) {
            SigningKey::from_pkcs8_pem(pem)
                .map(CryptoKey::Signing)
                .map_err(|e| CryptoError::InvalidPem(e.to_string()))
        } else if pem.contains(PUBLIC_KEY_MARKER) {
            VerifyingKey::from_public_key_pem(pem)
                .map(CryptoKey::Verifying)
                .map_err(|e| CryptoError::InvalidPem(e.to_string()))
        } else {
            Err(CryptoError::InvalidPem(
                "missing PUBLIC KEY or PRIVATE KEY marker".to_string(),
            ))
        }
    }

    pub fn to_pem(&self) -> Result<String, CryptoError> {
        match self {
            CryptoKey::Signing(key) => key
                .to_pkcs8_pem(LineEnding::LF)
                .map(|pem| pem.to_string())
                .map_err(|e| CryptoError::InvalidPem(e.to_string())),
            CryptoKey::Verifying(key) => key
                .to_public_key_pem(LineEnding::LF)
                .map_err(|e| CryptoError::InvalidPem(e.to_string())),
        }
    }

    /// Signs `message`, returning the raw `r||s` signature bytes.
    pub fn sign(&self, message: &[u8]) -> Result<[u8; SIGNATURE_LENGTH], CryptoError> {
        match self {
            CryptoKey::Signing(key) => {
                let signature: Signature = key
                    .try_sign(message)
                    .map_err(|e| CryptoError::Signing(e.to_string()))?;
                let mut raw = [0u8; SIGNATURE_LENGTH];
                raw.copy_from_slice(signature.to_bytes().as_slice());
                Ok(raw)
            }
            CryptoKey::Verifying(_) => Err(CryptoError::KeyMisuse("sign")),
        }
    }

    /// Checks `signature` over `message`.
    ///
    /// A signature whose scalars do not parse is a mismatch, not an error.
    pub fn verify(
        &self,
        signature: &[u8; SIGNATURE_LENGTH],
        message: &[u8],
    ) -> Result<bool, CryptoError> {
        match self {
            CryptoKey::Verifying(key) => match Signature::from_slice(signature) {
                Ok(signature) => Ok(key.verify(message, &signature).is_ok()),
                Err(_) => Ok(false),
            },
            CryptoKey::Signing(_) => Err(CryptoError::KeyMisuse("verify")),
        }
    }
}

impl fmt::Debug for CryptoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoKey::Signing(_) => write!(f, "CryptoKey::Signing"),
            CryptoKey::Verifying(_) => write!(f, "CryptoKey::Verifying"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_verify_roundtrip() {
        let pair = OwidKeyPair::generate();
        let message = b"signature target";

        let signature = pair.signing_key().sign(message).unwrap();
        assert!(pair.verifying_key().verify(&signature, message).unwrap());
    }

    #[test]
    fn tampered_message_does_not_verify() {
        let pair = OwidKeyPair::generate();
        let signature = pair.signing_key().sign(b"original").unwrap();
        assert!(!pair.verifying_key().verify(&signature, b"tampered").unwrap());
    }

    #[test]
    fn wrong_key_does_not_verify() {
        let pair = OwidKeyPair::generate();
        let other = OwidKeyPair::generate();
        let signature = pair.signing_key().sign(b"message").unwrap();
        assert!(!other.verifying_key().verify(&signature, b"message").unwrap());
    }

    #[test]
    fn verifying_key_cannot_sign() {
        let pair = OwidKeyPair::generate();
        let err = pair.verifying_key().sign(b"message").unwrap_err();
        assert!(matches!(err, CryptoError::KeyMisuse("sign")));
    }

    #[test]
    fn signing_key_cannot_verify() {
        let pair = OwidKeyPair::generate();
        let err = pair
            .signing_key()
            .verify(&[0u8; SIGNATURE_LENGTH], b"message")
            .unwrap_err();
        assert!(matches!(err, CryptoError::KeyMisuse("verify")));
    }

    #[test]
    fn public_pem_roundtrip() {
        let pair = OwidKeyPair::generate();
        let pem = pair.public_key_pem().unwrap();
        assert!(pem.contains("BEGIN PUBLIC KEY"));

        let imported = CryptoKey::from_pem(&pem).unwrap();
        assert!(matches!(imported, CryptoKey::Verifying(_)));

        let signature = pair.signing_key().sign(b"pem roundtrip").unwrap();
        assert!(imported.verify(&signature, b"pem roundtrip").unwrap());
    }

    #[test]
    fn private_pem_roundtrip() {
        let pair = OwidKeyPair::generate();
        let pem = pair.private_key_pem().unwrap();
        assert!(pem.contains("BEGIN PRIVATE KEY"));

        let imported = CryptoKey::from_pem(&pem).unwrap();
        assert!(matches!(imported, CryptoKey::Signing(_)));

        let signature = imported.sign(b"pem roundtrip").unwrap();
        assert!(pair.verifying_key().verify(&signature, b"pem roundtrip").unwrap());
    }

    #[test]
    fn unmarked_pem_is_rejected() {
        let err = CryptoKey::from_pem("not a key").unwrap_err();
        assert!(matches!(err, CryptoError::InvalidPem(_)));
    }

    #[test]
    fn garbage_inside_markers_is_rejected() {
        let pem = "-----BEGIN PUBLIC KEY-----\nAAAA\n-----END PUBLIC KEY-----\n";
        assert!(matches!(
            CryptoKey::from_pem(pem),
            Err(CryptoError::InvalidPem(_))
        ));
    }
}
