//! Shared test fixtures: deterministic Ed25519 signers that sign through the
//! same canonicalization the verifier uses, config builders, and golden
//! consensus cases.

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ed25519_dalek::{Signer, SigningKey};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use cre_core::config::IdentityConfig;
use cre_core::models::{AgentId, ClaimRequest, Role};
use cre_core::CreConfig;
use cre_identity::canonical;

/// Junior's secret key. Its signature over the canonical API_PORT=7000 claim
/// is [`JUNIOR_API_PORT_SIGNATURE`].
pub const JUNIOR_SECRET_B64: &str = "tyCAXGEj8DmGJllVGw3H5j/FsXybExoRJZ7h/uZM79A=";
pub const JUNIOR_PUBLIC_B64: &str = "xtyXT9YG6S0iQHBXVvvcSyVgb/MDIo1nvvBOP9+lc/g=";
pub const JUNIOR_API_PORT_SIGNATURE: &str =
    "su9DSmfwSxyFZ5SraW2nAhRKKuJKYn4GSnkWCiwEPo/Ff6S+p4OK8ybtjlwzkZO0Z0MIFpu2M8MzfVANb2vmDQ==";

/// An identity together with its private key.
pub struct TestSigner {
    pub id: String,
    pub role: Role,
    key: SigningKey,
}

impl TestSigner {
    /// Deterministic signer whose secret key is `[seed; 32]`.
    pub fn from_seed(id: &str, role: Role, seed: u8) -> Self {
        Self {
            id: id.to_string(),
            role,
            key: SigningKey::from_bytes(&[seed; 32]),
        }
    }

    pub fn junior() -> Self {
        let secret: [u8; 32] = STANDARD
            .decode(JUNIOR_SECRET_B64)
            .expect("fixture key is base64")
            .try_into()
            .expect("fixture key is 32 bytes");
        Self {
            id: "Junior".to_string(),
            role: Role::Agent,
            key: SigningKey::from_bytes(&secret),
        }
    }

    pub fn senior() -> Self {
        Self::from_seed("Senior", Role::Agent, 11)
    }

    pub fn reviewer() -> Self {
        Self::from_seed("Reviewer", Role::Agent, 12)
    }

    pub fn admin() -> Self {
        Self::from_seed("Admin", Role::HumanAdmin, 21)
    }

    pub fn agent_id(&self) -> AgentId {
        AgentId(self.id.clone())
    }

    pub fn public_key_b64(&self) -> String {
        STANDARD.encode(self.key.verifying_key().to_bytes())
    }

    pub fn identity_config(&self) -> IdentityConfig {
        IdentityConfig {
            id: self.id.clone(),
            role: self.role,
            public_key: self.public_key_b64(),
            active: true,
        }
    }

    /// Base64 signature over raw payload bytes.
    pub fn sign(&self, payload: &[u8]) -> String {
        STANDARD.encode(self.key.sign(payload).to_bytes())
    }

    /// A claim request in this signer's name plus its signature.
    pub fn signed_claim(&self, entity: &str, value: &str, confidence: f64) -> (ClaimRequest, String) {
        let payload = canonical::claim_payload(&self.id, entity, value, confidence)
            .expect("claim payload serializes");
        let request = ClaimRequest {
            agent: self.agent_id(),
            entity: entity.to_string(),
            value: value.to_string(),
            confidence,
        };
        (request, self.sign(&payload))
    }

    pub fn sign_override_set(&self, entity: &str, value: &str, reason: &str) -> String {
        let payload = canonical::override_set_payload(entity, value, reason)
            .expect("override payload serializes");
        self.sign(&payload)
    }

    pub fn sign_override_clear(&self, entity: &str) -> String {
        let payload =
            canonical::override_clear_payload(entity).expect("override payload serializes");
        self.sign(&payload)
    }
}

/// Default config with the given signers registered.
pub fn config_with(signers: &[&TestSigner]) -> CreConfig {
    CreConfig {
        identities: signers.iter().map(|s| s.identity_config()).collect(),
        ..CreConfig::default()
    }
}

/// One golden consensus case.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsensusCase {
    pub name: String,
    pub claims: Vec<GoldenClaim>,
    pub expected_status: String,
    pub expected_value: Option<String>,
    pub expected_reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoldenClaim {
    pub agent: String,
    pub value: String,
    pub confidence: f64,
    pub trust: f64,
}

/// Root directory of the fixtures crate.
fn fixtures_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);
    while !path.join("test-fixtures").join("golden").exists() {
        if !path.pop() {
            panic!("could not find test-fixtures from CARGO_MANIFEST_DIR={manifest_dir}");
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("failed to parse fixture {}: {}", path.display(), e))
}

pub fn consensus_cases() -> Vec<ConsensusCase> {
    load_fixture("golden/consensus_cases.json")
}
