//! The OWID object: canonical message assembly, signing, verification and
//! serialization.
//!
//! An OWID is created unsigned, then either signed with a private key or
//! populated from a serialized form and verified. Verification walks the
//! status machine `NotStarted -> Processing -> {Valid, NotValid,
//! SignerNotFound, KeyNotFound, Exception}`; fatal errors propagate and
//! leave the status at `Exception`, ordinary negative outcomes are returned
//! as statuses.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::date::{self, DateError};
use crate::common::io::{ByteReader, ByteWriter, CodecError, SIGNATURE_LENGTH};
use crate::domain::crypto::{CryptoError, CryptoKey};
use crate::domain::key::Key;
use crate::domain::signer::Signer;
use crate::domain::status::VerifiedStatus;
use crate::domain::target::OwidTarget;
use crate::port::signer_resolver::{SignerQuery, SignerResolver, SignerResolverError};

/// The only defined OWID format version.
pub const OWID_VERSION: u8 = 1;

/// Slack subtracted from a key's creation time during selection, absorbing
/// clock skew between participants.
const KEY_CREATED_TOLERANCE_MS: i64 = 3_600_000;

#[derive(Debug, Error)]
pub enum OwidError {
    #[error("domain must be set before signing or verifying")]
    NoDomain,

    #[error("OWID is not signed")]
    NotSigned,

    #[error("signer has no private keys")]
    NoPrivateKey,

    #[error("unsupported OWID version {0}")]
    UnsupportedVersion(u8),

    #[error("signer domain {signer} does not match OWID domain {owid}")]
    DomainMismatch { signer: String, owid: String },

    #[error("invalid base64: {0}")]
    Base64(String),

    #[error("invalid JSON document: {0}")]
    Json(String),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Date(#[from] DateError),

    #[error(transparent)]
    Resolver(#[from] SignerResolverError),
}

/// The JSON form of an OWID: `{version, domain, timestamp, signature}`.
#[derive(Debug, Serialize, Deserialize)]
struct OwidDocument {
    version: u8,
    domain: String,
    timestamp: u32,
    signature: String,
}

/// A signed identifier binding a target's bytes to a domain, a timestamp
/// and a format version.
///
/// The OWID owns its target; targets never own their OWID. Verification
/// mutates the status and the recorded signer, so an `Owid` is not safe
/// for concurrent mutation; read-only access after signing is.
#[derive(Debug, Clone)]
pub struct Owid<T: OwidTarget> {
    version: u8,
    domain: String,
    timestamp: u32,
    signature: Option<[u8; SIGNATURE_LENGTH]>,
    target: T,
    status: VerifiedStatus,
    signer: Option<Arc<Signer>>,
}

impl<T: OwidTarget> Owid<T> {
    /// Creates an unsigned OWID around `target`.
    pub fn new(target: T) -> Self {
        Self {
            version: OWID_VERSION,
            domain: String::new(),
            timestamp: 0,
            signature: None,
            target,
            status: VerifiedStatus::NotStarted,
            signer: None,
        }
    }

    /// Populates an OWID from its byte form. The first byte dispatches on
    /// version; only version 1 is defined.
    pub fn from_bytes(target: T, bytes: &[u8]) -> Result<Self, OwidError> {
        let mut reader = ByteReader::new(bytes);
        let version = reader.read_byte()?;
        if version != OWID_VERSION {
            return Err(OwidError::UnsupportedVersion(version));
        }
        let domain = reader.read_string()?;
        let timestamp = reader.read_date()?;
        let signature = reader.read_signature()?;
        Ok(Self {
            version,
            domain,
            timestamp,
            signature: Some(signature),
            target,
            status: VerifiedStatus::NotStarted,
            signer: None,
        })
    }

    /// Populates an OWID from the base64 encoding of its byte form.
    pub fn from_base64(target: T, encoded: &str) -> Result<Self, OwidError> {
        let bytes = BASE64_STANDARD
            .decode(encoded)
            .map_err(|e| OwidError::Base64(e.to_string()))?;
        Self::from_bytes(target, &bytes)
    }

    /// Populates an OWID from its JSON form.
    pub fn from_json(target: T, json: &str) -> Result<Self, OwidError> {
        let document: OwidDocument =
            serde_json::from_str(json).map_err(|e| OwidError::Json(e.to_string()))?;
        if document.version != OWID_VERSION {
            return Err(OwidError::UnsupportedVersion(document.version));
        }
        let raw = BASE64_STANDARD
            .decode(&document.signature)
            .map_err(|e| OwidError::Base64(e.to_string()))?;
        let len = raw.len();
        let signature: [u8; SIGNATURE_LENGTH] = raw
            .try_into()
            .map_err(|_| CodecError::BadSignatureLength { len })?;
        Ok(Self {
            version: document.version,
            domain: document.domain,
            timestamp: document.timestamp,
            signature: Some(signature),
            target,
            status: VerifiedStatus::NotStarted,
            signer: None,
        })
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Minutes since the epoch base.
    pub fn timestamp(&self) -> u32 {
        self.timestamp
    }

    /// The timestamp as a wall-clock instant.
    pub fn timestamp_date(&self) -> DateTime<Utc> {
        date::from_minutes(self.timestamp)
    }

    pub fn signature(&self) -> Option<&[u8; SIGNATURE_LENGTH]> {
        self.signature.as_ref()
    }

    pub fn signature_base64(&self) -> Option<String> {
        self.signature.map(|signature| BASE64_STANDARD.encode(signature))
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    pub fn status(&self) -> VerifiedStatus {
        self.status
    }

    /// The signer recorded by the last signer- or service-based operation.
    pub fn signer(&self) -> Option<&Arc<Signer>> {
        self.signer.as_ref()
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Mutable access to the target. Changing the target's bytes after
    /// signing leaves the stale signature in place, so verification
    /// deterministically returns `NotValid`.
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Replaces the domain. Stale signatures are kept, as with
    /// [`target_mut`](Self::target_mut).
    pub fn set_domain(&mut self, domain: impl Into<String>) {
        self.domain = domain.into();
    }

    /// Replaces the timestamp. Stale signatures are kept.
    pub fn set_timestamp(&mut self, minutes: u32) {
        self.timestamp = minutes;
    }

    /// Assembles the exact byte sequence fed to the signature primitive:
    /// target bytes, version byte, NUL-terminated domain, timestamp.
    ///
    /// The signature itself is never part of the signed message.
    fn signing_message(&self) -> Result<Vec<u8>, OwidError> {
        if self.domain.is_empty() {
            return Err(OwidError::NoDomain);
        }
        let mut writer = ByteWriter::new();
        self.target.add_owid_data(&mut writer)?;
        writer.write_byte(self.version);
        writer.write_string(&self.domain)?;
        writer.write_u32(self.timestamp);
        Ok(writer.into_bytes())
    }

    /// Signs the canonical message with `key`, stamping the current time.
    ///
    /// The domain must already be set. Fails with `KeyMisuse` when `key`
    /// cannot sign.
    pub fn sign_with_crypto_key(&mut self, key: &CryptoKey) -> Result<(), OwidError> {
        self.version = OWID_VERSION;
        self.timestamp = date::now_in_minutes()?;
        let message = self.signing_message()?;
        self.signature = Some(key.sign(&message)?);
        Ok(())
    }

    /// Imports `pem` and signs with the resulting key.
    pub fn sign_with_pem_key(&mut self, pem: &str) -> Result<(), OwidError> {
        let key = CryptoKey::from_pem(pem)?;
        self.sign_with_crypto_key(&key)
    }

    /// Signs with `signer`'s newest private key, taking the signer's
    /// domain and recording the signer on the OWID.
    pub fn sign_with_signer(&mut self, signer: &Arc<Signer>) -> Result<(), OwidError> {
        let key = signer.newest_private_key().ok_or(OwidError::NoPrivateKey)?;
        let crypto = key.crypto_key()?;
        self.domain = signer.domain.clone();
        self.sign_with_crypto_key(crypto)?;
        self.signer = Some(Arc::clone(signer));
        Ok(())
    }

    fn begin_verification(&mut self) {
        self.status = VerifiedStatus::Processing;
        self.signer = None;
    }

    fn finish(
        &mut self,
        outcome: Result<VerifiedStatus, OwidError>,
    ) -> Result<VerifiedStatus, OwidError> {
        match outcome {
            Ok(status) => {
                self.status = status;
                Ok(status)
            }
            Err(err) => {
                self.status = VerifiedStatus::Exception;
                Err(err)
            }
        }
    }

    fn check_signature(&self, key: &CryptoKey) -> Result<VerifiedStatus, OwidError> {
        let signature = self.signature.as_ref().ok_or(OwidError::NotSigned)?;
        let message = self.signing_message()?;
        if key.verify(signature, &message)? {
            Ok(VerifiedStatus::Valid)
        } else {
            Ok(VerifiedStatus::NotValid)
        }
    }

    /// Reassembles the signed message and checks the signature with `key`.
    pub fn verify_with_crypto(&mut self, key: &CryptoKey) -> Result<VerifiedStatus, OwidError> {
        self.begin_verification();
        let outcome = self.check_signature(key);
        self.finish(outcome)
    }

    /// Materializes `key`'s crypto key, then verifies with it.
    pub fn verify_with_public_key(&mut self, key: &Key) -> Result<VerifiedStatus, OwidError> {
        self.begin_verification();
        let outcome = match key.crypto_key() {
            Ok(crypto) => self.check_signature(crypto),
            Err(err) => Err(err.into()),
        };
        self.finish(outcome)
    }

    /// Verifies against the first time-eligible key in `keys`.
    ///
    /// A key is eligible when its creation time, less a one-hour
    /// tolerance, is not after the OWID timestamp; newer keys are "future
    /// keys" and are skipped. The first eligible key in list order is the
    /// only one tried; if none is eligible the outcome is `KeyNotFound`.
    pub fn verify_with_public_keys(&mut self, keys: &[Key]) -> Result<VerifiedStatus, OwidError> {
        self.begin_verification();
        let outcome = self.select_and_check(keys);
        self.finish(outcome)
    }

    fn select_and_check(&self, keys: &[Key]) -> Result<VerifiedStatus, OwidError> {
        let timestamp = self.timestamp_date();
        let tolerance = Duration::milliseconds(KEY_CREATED_TOLERANCE_MS);
        for key in keys {
            if key.created() - tolerance <= timestamp {
                let crypto = key.crypto_key()?;
                return self.check_signature(crypto);
            }
        }
        Ok(VerifiedStatus::KeyNotFound)
    }

    /// Verifies against `signer`'s public keys.
    ///
    /// The signer's domain must equal the OWID's; on a `Valid` or
    /// `NotValid` outcome the signer is recorded on the OWID.
    pub fn verify_with_signer(&mut self, signer: &Arc<Signer>) -> Result<VerifiedStatus, OwidError> {
        self.begin_verification();
        if signer.domain != self.domain {
            return self.finish(Err(OwidError::DomainMismatch {
                signer: signer.domain.clone(),
                owid: self.domain.clone(),
            }));
        }
        let result = self.verify_with_public_keys(&signer.public_keys);
        if matches!(
            result,
            Ok(VerifiedStatus::Valid) | Ok(VerifiedStatus::NotValid)
        ) {
            self.signer = Some(Arc::clone(signer));
        }
        result
    }

    /// Resolves the signer for this OWID's `(version, domain)` and
    /// verifies against it. An unknown signer is the ordinary outcome
    /// `SignerNotFound`.
    pub async fn verify_with_service<R>(&mut self, resolver: &R) -> Result<VerifiedStatus, OwidError>
    where
        R: SignerResolver + ?Sized,
    {
        self.begin_verification();
        let query = SignerQuery::new(self.version, self.domain.clone());
        match resolver.get(&query).await {
            Ok(Some(signer)) => self.verify_with_signer(&signer),
            Ok(None) => self.finish(Ok(VerifiedStatus::SignerNotFound)),
            Err(err) => self.finish(Err(err.into())),
        }
    }

    /// The OWID's own byte form: version, domain, timestamp, signature.
    ///
    /// Target bytes are not included; targets are serialized by their
    /// owning structure.
    pub fn to_bytes(&self) -> Result<Vec<u8>, OwidError> {
        let signature = self.signature.as_ref().ok_or(OwidError::NotSigned)?;
        let mut writer = ByteWriter::new();
        writer.write_byte(self.version);
        writer.write_string(&self.domain)?;
        writer.write_date(self.timestamp);
        writer.write_signature(signature)?;
        Ok(writer.into_bytes())
    }

    pub fn to_base64(&self) -> Result<String, OwidError> {
        Ok(BASE64_STANDARD.encode(self.to_bytes()?))
    }

    pub fn to_json(&self) -> Result<String, OwidError> {
        let signature = self.signature.as_ref().ok_or(OwidError::NotSigned)?;
        let document = OwidDocument {
            version: self.version,
            domain: self.domain.clone(),
            timestamp: self.timestamp,
            signature: BASE64_STANDARD.encode(signature),
        };
        serde_json::to_string(&document).map_err(|e| OwidError::Json(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::crypto::OwidKeyPair;
    use crate::domain::target::TextTarget;

    const DOMAIN: &str = "example.test";

    fn signed_owid() -> (Owid<TextTarget>, OwidKeyPair) {
        let pair = OwidKeyPair::generate();
        let mut owid = Owid::new(TextTarget::new("example test"));
        owid.set_domain(DOMAIN);
        owid.sign_with_crypto_key(&pair.signing_key()).unwrap();
        (owid, pair)
    }

    fn public_key(pair: &OwidKeyPair, created: DateTime<Utc>) -> Key {
        Key::new(pair.public_key_pem().unwrap(), created)
    }

    fn signer_for(domain: &str, public_keys: Vec<Key>, private_keys: Vec<Key>) -> Arc<Signer> {
        Arc::new(Signer {
            version: OWID_VERSION,
            domain: domain.to_string(),
            name: "Example".to_string(),
            email: "owid@example.test".to_string(),
            terms_url: "https://example.test/terms".to_string(),
            public_keys,
            private_keys,
        })
    }

    #[test]
    fn signing_stamps_version_timestamp_and_signature() {
        let (owid, _) = signed_owid();
        assert_eq!(owid.version(), OWID_VERSION);
        assert!(owid.timestamp() > 0);
        assert!(owid.is_signed());
        assert_eq!(owid.signature().unwrap().len(), SIGNATURE_LENGTH);
        assert_eq!(owid.status(), VerifiedStatus::NotStarted);
    }

    #[test]
    fn signing_without_a_domain_fails() {
        let pair = OwidKeyPair::generate();
        let mut owid = Owid::new(TextTarget::new("example test"));
        let err = owid.sign_with_crypto_key(&pair.signing_key()).unwrap_err();
        assert!(matches!(err, OwidError::NoDomain));
    }

    #[test]
    fn sign_verify_roundtrip() {
        let (mut owid, pair) = signed_owid();
        let status = owid.verify_with_crypto(&pair.verifying_key()).unwrap();
        assert_eq!(status, VerifiedStatus::Valid);
        assert_eq!(owid.status(), VerifiedStatus::Valid);
        assert!(owid.signer().is_none());
    }

    #[test]
    fn pem_sign_path_verifies() {
        let pair = OwidKeyPair::generate();
        let mut owid = Owid::new(TextTarget::new("example test"));
        owid.set_domain(DOMAIN);
        owid.sign_with_pem_key(&pair.private_key_pem().unwrap()).unwrap();
        let status = owid.verify_with_crypto(&pair.verifying_key()).unwrap();
        assert_eq!(status, VerifiedStatus::Valid);
    }

    #[test]
    fn domain_tampering_invalidates() {
        let (mut owid, pair) = signed_owid();
        owid.set_domain("tampered.test");
        let status = owid.verify_with_crypto(&pair.verifying_key()).unwrap();
        assert_eq!(status, VerifiedStatus::NotValid);
    }

    #[test]
    fn timestamp_tampering_invalidates() {
        let (mut owid, pair) = signed_owid();
        owid.set_timestamp(owid.timestamp() + 1);
        let status = owid.verify_with_crypto(&pair.verifying_key()).unwrap();
        assert_eq!(status, VerifiedStatus::NotValid);
    }

    #[test]
    fn payload_tampering_invalidates() {
        let (mut owid, pair) = signed_owid();
        owid.target_mut().set_value("example test!");
        let status = owid.verify_with_crypto(&pair.verifying_key()).unwrap();
        assert_eq!(status, VerifiedStatus::NotValid);
    }

    #[test]
    fn verifying_with_a_signing_key_is_an_exception() {
        let (mut owid, pair) = signed_owid();
        let err = owid.verify_with_crypto(&pair.signing_key()).unwrap_err();
        assert!(matches!(err, OwidError::Crypto(CryptoError::KeyMisuse(_))));
        assert_eq!(owid.status(), VerifiedStatus::Exception);
    }

    #[test]
    fn verifying_an_unsigned_owid_is_an_exception() {
        let pair = OwidKeyPair::generate();
        let mut owid = Owid::new(TextTarget::new("example test"));
        owid.set_domain(DOMAIN);
        let err = owid.verify_with_crypto(&pair.verifying_key()).unwrap_err();
        assert!(matches!(err, OwidError::NotSigned));
        assert_eq!(owid.status(), VerifiedStatus::Exception);
    }

    #[test]
    fn verify_with_public_key_materializes_lazily() {
        let (mut owid, pair) = signed_owid();
        let key = public_key(&pair, Utc::now());
        let status = owid.verify_with_public_key(&key).unwrap();
        assert_eq!(status, VerifiedStatus::Valid);
        assert!(owid.signer().is_none());
    }

    #[test]
    fn first_eligible_key_is_selected() {
        let (mut owid, pair) = signed_owid();
        let other = OwidKeyPair::generate();
        let t = owid.timestamp_date();
        let keys = vec![
            public_key(&pair, t - Duration::milliseconds(1)),
            public_key(&other, t + Duration::milliseconds(1)),
            public_key(&pair, t + Duration::milliseconds(2)),
        ];
        let status = owid.verify_with_public_keys(&keys).unwrap();
        assert_eq!(status, VerifiedStatus::Valid);
    }

    #[test]
    fn selection_does_not_fall_through_on_mismatch() {
        let (mut owid, pair) = signed_owid();
        let other = OwidKeyPair::generate();
        let t = owid.timestamp_date();
        // Both keys are eligible; the first one does not verify and the
        // matching key behind it must not be consulted.
        let keys = vec![
            public_key(&other, t - Duration::hours(2)),
            public_key(&pair, t - Duration::hours(1)),
        ];
        let status = owid.verify_with_public_keys(&keys).unwrap();
        assert_eq!(status, VerifiedStatus::NotValid);
    }

    #[test]
    fn future_keys_are_skipped() {
        let (mut owid, pair) = signed_owid();
        let t = owid.timestamp_date();
        let keys = vec![public_key(&pair, t + Duration::hours(2))];
        let status = owid.verify_with_public_keys(&keys).unwrap();
        assert_eq!(status, VerifiedStatus::KeyNotFound);
        assert_eq!(owid.status(), VerifiedStatus::KeyNotFound);
    }

    #[test]
    fn key_within_tolerance_is_eligible() {
        let (mut owid, pair) = signed_owid();
        let t = owid.timestamp_date();
        // Created after the timestamp, but within the one-hour tolerance.
        let keys = vec![public_key(&pair, t + Duration::minutes(30))];
        let status = owid.verify_with_public_keys(&keys).unwrap();
        assert_eq!(status, VerifiedStatus::Valid);
    }

    #[test]
    fn signer_signing_takes_domain_and_records_signer() {
        let pair = OwidKeyPair::generate();
        let signer = signer_for(
            DOMAIN,
            vec![public_key(&pair, Utc::now())],
            vec![Key::new(pair.private_key_pem().unwrap(), Utc::now())],
        );
        let mut owid = Owid::new(TextTarget::new("example test"));
        owid.sign_with_signer(&signer).unwrap();
        assert_eq!(owid.domain(), DOMAIN);
        assert!(owid.is_signed());
        assert!(Arc::ptr_eq(owid.signer().unwrap(), &signer));

        let status = owid.verify_with_signer(&signer).unwrap();
        assert_eq!(status, VerifiedStatus::Valid);
    }

    #[test]
    fn signer_without_private_keys_cannot_sign() {
        let pair = OwidKeyPair::generate();
        let signer = signer_for(DOMAIN, vec![public_key(&pair, Utc::now())], Vec::new());
        let mut owid = Owid::new(TextTarget::new("example test"));
        let err = owid.sign_with_signer(&signer).unwrap_err();
        assert!(matches!(err, OwidError::NoPrivateKey));
    }

    #[test]
    fn signer_domain_mismatch_is_an_exception() {
        let (mut owid, pair) = signed_owid();
        let signer = signer_for("other.test", vec![public_key(&pair, Utc::now())], Vec::new());
        let err = owid.verify_with_signer(&signer).unwrap_err();
        assert!(matches!(err, OwidError::DomainMismatch { .. }));
        assert_eq!(owid.status(), VerifiedStatus::Exception);
        assert!(owid.signer().is_none());
    }

    #[test]
    fn verification_clears_the_recorded_signer() {
        let pair = OwidKeyPair::generate();
        let signer = signer_for(
            DOMAIN,
            vec![public_key(&pair, Utc::now())],
            vec![Key::new(pair.private_key_pem().unwrap(), Utc::now())],
        );
        let mut owid = Owid::new(TextTarget::new("example test"));
        owid.sign_with_signer(&signer).unwrap();
        assert!(owid.signer().is_some());

        owid.verify_with_crypto(&pair.verifying_key()).unwrap();
        assert!(owid.signer().is_none());
    }

    #[test]
    fn byte_form_roundtrips() {
        let (owid, _) = signed_owid();
        let bytes = owid.to_bytes().unwrap();
        let parsed = Owid::from_bytes(TextTarget::new("example test"), &bytes).unwrap();
        assert_eq!(parsed.version(), owid.version());
        assert_eq!(parsed.domain(), owid.domain());
        assert_eq!(parsed.timestamp(), owid.timestamp());
        assert_eq!(parsed.signature(), owid.signature());
        assert_eq!(parsed.status(), VerifiedStatus::NotStarted);
    }

    #[test]
    fn base64_form_roundtrips_and_verifies() {
        let (owid, pair) = signed_owid();
        let encoded = owid.to_base64().unwrap();
        let mut parsed = Owid::from_base64(TextTarget::new("example test"), &encoded).unwrap();
        let status = parsed.verify_with_crypto(&pair.verifying_key()).unwrap();
        assert_eq!(status, VerifiedStatus::Valid);
    }

    #[test]
    fn json_form_roundtrips() {
        let (owid, _) = signed_owid();
        let json = owid.to_json().unwrap();
        assert!(json.contains("\"domain\":\"example.test\""));

        let parsed = Owid::from_json(TextTarget::new("example test"), &json).unwrap();
        assert_eq!(parsed.domain(), owid.domain());
        assert_eq!(parsed.timestamp(), owid.timestamp());
        assert_eq!(parsed.signature(), owid.signature());
    }

    #[test]
    fn unknown_version_byte_is_rejected() {
        let (owid, _) = signed_owid();
        let mut bytes = owid.to_bytes().unwrap();
        bytes[0] = 2;
        let err = Owid::from_bytes(TextTarget::new("example test"), &bytes).unwrap_err();
        assert!(matches!(err, OwidError::UnsupportedVersion(2)));
    }

    #[test]
    fn unknown_json_version_is_rejected() {
        let json = format!(
            "{{\"version\":3,\"domain\":\"{DOMAIN}\",\"timestamp\":1,\"signature\":\"{}\"}}",
            BASE64_STANDARD.encode([0u8; SIGNATURE_LENGTH])
        );
        let err = Owid::from_json(TextTarget::new("example test"), &json).unwrap_err();
        assert!(matches!(err, OwidError::UnsupportedVersion(3)));
    }

    #[test]
    fn short_json_signature_is_rejected() {
        let json = format!(
            "{{\"version\":1,\"domain\":\"{DOMAIN}\",\"timestamp\":1,\"signature\":\"{}\"}}",
            BASE64_STANDARD.encode([0u8; 32])
        );
        let err = Owid::from_json(TextTarget::new("example test"), &json).unwrap_err();
        assert!(matches!(
            err,
            OwidError::Codec(CodecError::BadSignatureLength { len: 32 })
        ));
    }

    #[test]
    fn unsigned_owids_do_not_serialize() {
        let owid = Owid::new(TextTarget::new("example test"));
        assert!(matches!(owid.to_bytes(), Err(OwidError::NotSigned)));
        assert!(matches!(owid.to_json(), Err(OwidError::NotSigned)));
        assert!(owid.signature_base64().is_none());
    }

    #[test]
    fn truncated_byte_form_is_rejected() {
        let (owid, _) = signed_owid();
        let bytes = owid.to_bytes().unwrap();
        let err = Owid::from_bytes(TextTarget::new("example test"), &bytes[..bytes.len() - 1])
            .unwrap_err();
        assert!(matches!(err, OwidError::Codec(CodecError::Truncated { .. })));
    }
}
