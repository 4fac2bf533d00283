//! Top-level engine configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{IdentityConfig, ReviewConfig, SecurityConfig, SignatureMode, StorageConfig, TrustConfig};
use crate::errors::ConfigError;

/// Environment variable that can switch the signature mode explicitly.
pub const SIGNATURE_MODE_ENV: &str = "CRE_SIGNATURE_MODE";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`CRE_*`)
/// 2. Config file
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CreConfig {
    pub storage: StorageConfig,
    pub trust: TrustConfig,
    pub review: ReviewConfig,
    pub security: SecurityConfig,
    pub identities: Vec<IdentityConfig>,
}

impl CreConfig {
    /// Load a config file, apply environment overrides, and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let mut config: CreConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: CreConfig = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `CRE_*` environment overrides.
    ///
    /// The signature mode only changes when the variable names a mode
    /// explicitly; anything else is rejected rather than silently ignored.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(mode) = std::env::var(SIGNATURE_MODE_ENV) {
            self.security.signature_mode = match mode.as_str() {
                "enforce" => SignatureMode::Enforce,
                "insecure_bypass" => SignatureMode::InsecureBypass,
                other => {
                    return Err(ConfigError::ValidationFailed {
                        field: SIGNATURE_MODE_ENV.to_string(),
                        message: format!("unknown signature mode '{other}'"),
                    })
                }
            };
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.trust;
        if !(t.trust_floor.is_finite() && t.trust_ceiling.is_finite())
            || t.trust_floor > t.trust_ceiling
        {
            return Err(invalid("trust.trust_floor", "must not exceed trust_ceiling"));
        }
        if !(t.trust_floor..=t.trust_ceiling).contains(&t.default_trust) {
            return Err(invalid(
                "trust.default_trust",
                "must lie within [trust_floor, trust_ceiling]",
            ));
        }
        if t.base_reward < 0.0 || t.base_penalty < 0.0 {
            return Err(invalid("trust.base_reward", "rewards and penalties must be non-negative"));
        }
        if !(0.0..=1.0).contains(&t.decay_rate) {
            return Err(invalid("trust.decay_rate", "must be between 0.0 and 1.0"));
        }
        if t.decay_interval_secs == 0 {
            return Err(invalid("trust.decay_interval_secs", "must be greater than 0"));
        }
        if !(0.0..=1.0).contains(&self.review.min_confidence) {
            return Err(invalid("review.min_confidence", "must be between 0.0 and 1.0"));
        }
        if self.review.min_reviews == 0 {
            return Err(invalid("review.min_reviews", "must be at least 1"));
        }
        if self.storage.read_pool_size == 0 {
            return Err(invalid("storage.read_pool_size", "must be greater than 0"));
        }
        let mut seen = std::collections::HashSet::new();
        for identity in &self.identities {
            if !seen.insert(identity.id.as_str()) {
                return Err(invalid(
                    "identities.id",
                    &format!("duplicate identity '{}'", identity.id),
                ));
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
