use owid_core::domain::crypto::OwidKeyPair;
use owid_core::{Owid, TextTarget};

/// Developer tool that signs a sample payload and verifies it again.
///
/// Prints the base64 wire form of the OWID, the signer's public key PEM and
/// the verification status.
///
/// Run with:
/// `cargo run -p owid-core --example sign_and_verify`
fn main() {
    let pair = OwidKeyPair::generate();

    let mut owid = Owid::new(TextTarget::new("example test"));
    owid.set_domain("example.test");
    owid.sign_with_crypto_key(&pair.signing_key())
        .expect("signing with a fresh keypair should succeed");

    let encoded = owid.to_base64().expect("signed OWIDs serialize");
    let status = owid
        .verify_with_crypto(&pair.verifying_key())
        .expect("verification with the matching public key should succeed");

    println!("owid_base64: {encoded}");
    println!("public_key_pem:\n{}", pair.public_key_pem().expect("public key exports"));
    println!("status: {status}");
}
