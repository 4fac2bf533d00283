//! Third-party error reports and the penalties derived from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::claim::AgentId;

/// A reviewer's report that `target_agent` asserted a wrong value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorReview {
    pub reviewer_agent: AgentId,
    pub target_agent: AgentId,
    pub entity: String,
    pub observed_value: String,
    pub expected_value: String,
    /// Free-form type such as `FACT_ERROR`; looked up in the severity table.
    pub error_type: String,
    pub confidence: f64,
    pub evidence: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Audit row written each time a review group converts into a penalty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PenaltyEvent {
    pub id: i64,
    pub agent_id: AgentId,
    pub entity: String,
    pub error_type: String,
    /// Severity weight of `error_type`.
    pub weight: f64,
    pub avg_confidence: f64,
    /// `avg_confidence × weight`, passed to the trust ledger as confidence.
    pub penalty_strength: f64,
    pub review_count: usize,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}
