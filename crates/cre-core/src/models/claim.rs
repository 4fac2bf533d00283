//! Claims: signed assertions that an entity has a given value.
//!
//! # Examples
//!
//! ```
//! use cre_core::models::{AgentId, ClaimRequest};
//!
//! let req = ClaimRequest {
//!     agent: AgentId::from("Junior"),
//!     entity: "API_PORT".to_string(),
//!     value: "7000".to_string(),
//!     confidence: 0.6,
//! };
//! assert_eq!(req.agent.to_string(), "Junior");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Agent identifier. Matches the identity id the agent authenticates with.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AgentId(pub String);

impl AgentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AgentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The fields an agent signs when submitting a claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClaimRequest {
    pub agent: AgentId,
    pub entity: String,
    pub value: String,
    pub confidence: f64,
}

/// A stored claim. Append-only: never mutated after insert except for the
/// settlement marker written when its resolution feeds the trust ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Claim {
    /// Monotonic, strictly increasing in submission order.
    pub id: i64,
    pub agent_id: AgentId,
    pub entity: String,
    pub value: String,
    /// Clamped to `[0.0, 1.0]`.
    pub confidence: f64,
    /// Submitter trust captured at submission time; never updated later.
    pub trust_at_submission: f64,
    pub timestamp: DateTime<Utc>,
    /// Resolution that settled this claim's trust feedback, if any.
    pub settled_by: Option<i64>,
}

impl Claim {
    /// Consensus weight of this claim: `confidence × trust_at_submission`.
    pub fn weight(&self) -> f64 {
        self.confidence * self.trust_at_submission
    }
}
