use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::StorageError;

/// An entry in the append-only audit log.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuditEntry {
    pub id: i64,
    pub event: AuditEvent,
    /// Entity or agent the event concerns.
    pub subject: String,
    /// Identity id, or `system` for engine-driven events.
    pub actor: String,
    /// JSON details about the event.
    pub details: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

/// Events tracked in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AuditEvent {
    ClaimAdded,
    ConsensusResult,
    OverrideSet,
    OverrideCleared,
    OverrideUsed,
    PenaltiesApplied,
}

impl AuditEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEvent::ClaimAdded => "claim_added",
            AuditEvent::ConsensusResult => "consensus_result",
            AuditEvent::OverrideSet => "override_set",
            AuditEvent::OverrideCleared => "override_cleared",
            AuditEvent::OverrideUsed => "override_used",
            AuditEvent::PenaltiesApplied => "penalties_applied",
        }
    }
}

impl FromStr for AuditEvent {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "claim_added" => Ok(AuditEvent::ClaimAdded),
            "consensus_result" => Ok(AuditEvent::ConsensusResult),
            "override_set" => Ok(AuditEvent::OverrideSet),
            "override_cleared" => Ok(AuditEvent::OverrideCleared),
            "override_used" => Ok(AuditEvent::OverrideUsed),
            "penalties_applied" => Ok(AuditEvent::PenaltiesApplied),
            other => Err(StorageError::CorruptRow {
                table: "audit_log".to_string(),
                details: format!("unknown event '{other}'"),
            }),
        }
    }
}
