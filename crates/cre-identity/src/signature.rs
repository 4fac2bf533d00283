//! Ed25519 signature verification.
//!
//! Every failure (bad base64, wrong length, invalid key, non-verifying
//! signature) collapses into a single `InvalidSignature` error.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ed25519_dalek::{Signature, VerifyingKey};
use tracing::warn;

use cre_core::config::SignatureMode;
use cre_core::constants::PUBLIC_KEY_LEN;
use cre_core::errors::{CreResult, IdentityError};

/// Checks signatures according to the configured [`SignatureMode`].
#[derive(Debug, Clone, Copy)]
pub struct SignatureVerifier {
    mode: SignatureMode,
}

impl SignatureVerifier {
    pub fn new(mode: SignatureMode) -> Self {
        Self { mode }
    }

    /// A verifier that always enforces signatures.
    pub fn enforcing() -> Self {
        Self::new(SignatureMode::Enforce)
    }

    pub fn mode(&self) -> SignatureMode {
        self.mode
    }

    /// Verify a base64 signature over `payload` with the given public key.
    pub fn verify(&self, public_key: &[u8], payload: &[u8], signature_b64: &str) -> CreResult<()> {
        match self.mode {
            SignatureMode::Enforce => {
                let signature = decode_signature(signature_b64)?;
                verify_signature(public_key, payload, &signature)?;
                Ok(())
            }
            SignatureMode::InsecureBypass => {
                insecure_bypass(payload);
                Ok(())
            }
        }
    }
}

/// The only path that accepts an unverified payload. Never reached unless the
/// configuration names `insecure_bypass` explicitly.
fn insecure_bypass(payload: &[u8]) {
    warn!(
        payload_len = payload.len(),
        "signature verification bypassed (insecure_bypass mode)"
    );
}

/// Decode a base64 (standard alphabet) signature.
pub fn decode_signature(signature_b64: &str) -> Result<Vec<u8>, IdentityError> {
    if signature_b64.is_empty() {
        return Err(invalid("missing signature"));
    }
    STANDARD
        .decode(signature_b64)
        .map_err(|e| invalid(&format!("signature is not base64: {e}")))
}

/// Decode a base64 public key into its fixed-size form.
pub fn decode_public_key(public_key_b64: &str) -> Result<[u8; PUBLIC_KEY_LEN], IdentityError> {
    let bytes = STANDARD
        .decode(public_key_b64)
        .map_err(|e| invalid(&format!("public key is not base64: {e}")))?;
    let key: [u8; PUBLIC_KEY_LEN] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| invalid(&format!("public key must be {PUBLIC_KEY_LEN} bytes")))?;
    VerifyingKey::from_bytes(&key).map_err(|_| invalid("public key is not a valid Ed25519 point"))?;
    Ok(key)
}

/// Verify raw signature bytes against the exact payload bytes.
pub fn verify_signature(
    public_key: &[u8],
    payload: &[u8],
    signature: &[u8],
) -> Result<(), IdentityError> {
    let key_arr: [u8; PUBLIC_KEY_LEN] = public_key
        .try_into()
        .map_err(|_| invalid("invalid public key length"))?;
    let verifying_key =
        VerifyingKey::from_bytes(&key_arr).map_err(|_| invalid("invalid verifying key"))?;
    let signature = Signature::from_slice(signature).map_err(|_| invalid("invalid signature length"))?;
    verifying_key
        .verify_strict(payload, &signature)
        .map_err(|_| invalid("signature verification failed"))
}

/// Boolean form of [`verify_signature`].
pub fn is_valid(public_key: &[u8], payload: &[u8], signature: &[u8]) -> bool {
    verify_signature(public_key, payload, signature).is_ok()
}

fn invalid(reason: &str) -> IdentityError {
    IdentityError::InvalidSignature {
        reason: reason.to_string(),
    }
}
