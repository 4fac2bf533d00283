//! Configuration for the trust ledger.
//!
//! # Examples
//!
//! ```
//! use cre_core::config::TrustConfig;
//!
//! let config = TrustConfig::default();
//! assert!((config.default_trust - 0.1).abs() < f64::EPSILON);
//! assert_eq!(config.decay_rate, 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{
    BASE_PENALTY, BASE_REWARD, DEFAULT_DECAY_INTERVAL_SECS, DEFAULT_TRUST, TRUST_CEILING,
    TRUST_FLOOR,
};

/// Trust ledger learning rule and bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustConfig {
    /// Trust of an unseen agent. Default: 0.1.
    pub default_trust: f64,
    /// Lower clamp. Default: 0.05.
    pub trust_floor: f64,
    /// Upper clamp. Default: 1.0.
    pub trust_ceiling: f64,
    /// Reward per fully confident correct claim. Default: 0.05.
    pub base_reward: f64,
    /// Penalty per fully confident incorrect claim. Default: 0.05.
    pub base_penalty: f64,
    /// Fraction of the distance to `default_trust` removed per decay pass.
    /// Default: 0.0 (decay is a no-op).
    pub decay_rate: f64,
    /// Seconds between maintenance passes. Default: 300.
    pub decay_interval_secs: u64,
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            default_trust: DEFAULT_TRUST,
            trust_floor: TRUST_FLOOR,
            trust_ceiling: TRUST_CEILING,
            base_reward: BASE_REWARD,
            base_penalty: BASE_PENALTY,
            decay_rate: 0.0,
            decay_interval_secs: DEFAULT_DECAY_INTERVAL_SECS,
        }
    }
}

impl TrustConfig {
    /// Clamp a trust value into `[trust_floor, trust_ceiling]`.
    pub fn clamp(&self, trust: f64) -> f64 {
        trust.clamp(self.trust_floor, self.trust_ceiling)
    }
}
