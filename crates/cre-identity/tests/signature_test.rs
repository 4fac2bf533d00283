//! Ed25519 verification over canonical claim payloads.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ed25519_dalek::{Signer, SigningKey};

use cre_core::config::SignatureMode;
use cre_core::errors::{CreError, IdentityError};
use cre_identity::canonical::claim_payload;
use cre_identity::signature::{decode_public_key, is_valid, verify_signature};
use cre_identity::SignatureVerifier;

const JUNIOR_SECRET: &str = "tyCAXGEj8DmGJllVGw3H5j/FsXybExoRJZ7h/uZM79A=";
const JUNIOR_PUBLIC: &str = "xtyXT9YG6S0iQHBXVvvcSyVgb/MDIo1nvvBOP9+lc/g=";
const JUNIOR_SIGNATURE: &str =
    "su9DSmfwSxyFZ5SraW2nAhRKKuJKYn4GSnkWCiwEPo/Ff6S+p4OK8ybtjlwzkZO0Z0MIFpu2M8MzfVANb2vmDQ==";

/// Junior's signature over
/// `{"agent":"Junior","confidence":1e-05,"entity":"CITY","value":"caf\u00e9 \ud83d\ude80"}`
/// as produced by a `json.dumps(sort_keys=True, separators=(",", ":"))` client.
const JUNIOR_CITY_SIGNATURE: &str =
    "anhEc2Ltc7YhDco4fmWVDnTyLU8SMN3R+Lc1OjFYd7QuYXOANR0ATGVhws7crZ7EjM/0x9M3kulbeS4py2LLDw==";

fn junior_key() -> SigningKey {
    let bytes: [u8; 32] = STANDARD.decode(JUNIOR_SECRET).unwrap().try_into().unwrap();
    SigningKey::from_bytes(&bytes)
}

fn other_key() -> SigningKey {
    SigningKey::from_bytes(&[7u8; 32])
}

fn is_invalid_signature(err: &CreError) -> bool {
    matches!(
        err,
        CreError::IdentityError(IdentityError::InvalidSignature { .. })
    )
}

#[test]
fn junior_key_matches_published_public_key() {
    let public = junior_key().verifying_key().to_bytes();
    assert_eq!(STANDARD.encode(public), JUNIOR_PUBLIC);
}

#[test]
fn published_signature_verifies() {
    let public = decode_public_key(JUNIOR_PUBLIC).unwrap();
    let payload = claim_payload("Junior", "API_PORT", "7000", 0.6).unwrap();
    SignatureVerifier::enforcing()
        .verify(&public, &payload, JUNIOR_SIGNATURE)
        .unwrap();
}

#[test]
fn fresh_signature_verifies() {
    let key = junior_key();
    let payload = claim_payload("Junior", "API_PORT", "7000", 0.6).unwrap();
    let sig = key.sign(&payload);
    assert!(is_valid(
        &key.verifying_key().to_bytes(),
        &payload,
        &sig.to_bytes()
    ));
}

#[test]
fn other_agent_key_fails() {
    let payload = claim_payload("Junior", "API_PORT", "7000", 0.6).unwrap();
    let other = other_key().verifying_key().to_bytes();
    let err = SignatureVerifier::enforcing()
        .verify(&other, &payload, JUNIOR_SIGNATURE)
        .unwrap_err();
    assert!(is_invalid_signature(&err));
}

#[test]
fn mutated_payload_fails() {
    let public = decode_public_key(JUNIOR_PUBLIC).unwrap();
    for payload in [
        claim_payload("Junior", "API_PORT", "7001", 0.6).unwrap(),
        claim_payload("Junior", "API_PORT", "7000", 0.61).unwrap(),
        claim_payload("Senior", "API_PORT", "7000", 0.6).unwrap(),
        // Same fields, different key order.
        br#"{"agent":"Junior","entity":"API_PORT","value":"7000","confidence":0.6}"#.to_vec(),
    ] {
        let err = SignatureVerifier::enforcing()
            .verify(&public, &payload, JUNIOR_SIGNATURE)
            .unwrap_err();
        assert!(is_invalid_signature(&err));
    }
}

#[test]
fn malformed_inputs_are_invalid_signature() {
    let public = decode_public_key(JUNIOR_PUBLIC).unwrap();
    let payload = claim_payload("Junior", "API_PORT", "7000", 0.6).unwrap();
    let verifier = SignatureVerifier::enforcing();

    let short = STANDARD.encode([1u8; 10]);
    for sig in ["", "not base64!!", short.as_str()] {
        let err = verifier.verify(&public, &payload, sig).unwrap_err();
        assert!(is_invalid_signature(&err), "signature {sig:?}");
    }
    let err = verifier
        .verify(&public[..31], &payload, JUNIOR_SIGNATURE)
        .unwrap_err();
    assert!(is_invalid_signature(&err));

    assert!(matches!(
        verify_signature(&public, &payload, &[0u8; 64]),
        Err(IdentityError::InvalidSignature { .. })
    ));
}

#[test]
fn bad_public_keys_are_rejected_at_decode() {
    assert!(decode_public_key("AAAA").is_err());
    assert!(decode_public_key("%%%").is_err());
}

#[test]
fn bypass_mode_accepts_anything() {
    let verifier = SignatureVerifier::new(SignatureMode::InsecureBypass);
    assert_eq!(verifier.mode(), SignatureMode::InsecureBypass);
    verifier.verify(&[0u8; 3], b"whatever", "").unwrap();
}

#[test]
fn default_mode_enforces() {
    let verifier = SignatureVerifier::new(SignatureMode::default());
    assert!(verifier.verify(&[0u8; 32], b"x", "").is_err());
}

#[test]
fn escaped_unicode_and_exponent_confidence_verify() {
    let public = decode_public_key(JUNIOR_PUBLIC).unwrap();
    let payload = claim_payload("Junior", "CITY", "café 🚀", 1e-05).unwrap();
    SignatureVerifier::enforcing()
        .verify(&public, &payload, JUNIOR_CITY_SIGNATURE)
        .unwrap();

    let plain = claim_payload("Junior", "CITY", "cafe 🚀", 1e-05).unwrap();
    let err = SignatureVerifier::enforcing()
        .verify(&public, &plain, JUNIOR_CITY_SIGNATURE)
        .unwrap_err();
    assert!(is_invalid_signature(&err));
}
