//! Trust ledger records.
//!
//! Every mutation of a [`TrustRecord`] appends exactly one [`TrustEvent`]
//! carrying the realized delta, so absolute trust at any past instant can be
//! reconstructed by replaying `change` values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::claim::AgentId;

/// Current trust of one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrustRecord {
    pub agent_id: AgentId,
    /// Always within `[trust_floor, trust_ceiling]`.
    pub trust: f64,
    pub last_updated: DateTime<Utc>,
}

/// An immutable record of one trust delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrustEvent {
    pub id: i64,
    pub agent_id: AgentId,
    /// Realized delta after clamping (`new - old`), not the nominal delta.
    pub change: f64,
    pub reason: String,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

/// Absolute trust after one event, for timeline graphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrustTimelinePoint {
    pub timestamp: DateTime<Utc>,
    pub trust: f64,
}
