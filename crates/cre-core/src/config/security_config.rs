use serde::{Deserialize, Serialize};

/// How claim and override signatures are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureMode {
    /// Verify every signature. The only production mode.
    #[default]
    Enforce,
    /// Skip verification. Non-production only; every bypass is logged.
    InsecureBypass,
}

/// Authentication and quota settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub signature_mode: SignatureMode,
    /// Enforce per-identity claim quotas. Default: false.
    pub rate_limit_enabled: bool,
    /// Default: 5.
    pub agent_claims_per_minute: u32,
    /// Default: 100.
    pub admin_claims_per_minute: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            signature_mode: SignatureMode::Enforce,
            rate_limit_enabled: false,
            agent_claims_per_minute: 5,
            admin_claims_per_minute: 100,
        }
    }
}
