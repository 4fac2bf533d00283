//! ClaimStore: append claims with the submitter's trust at submission time.
//!
//! The stamped trust is a snapshot; later trust changes never rewrite it.
//! Authentication happens upstream, so no claim is rejected for content.

use rusqlite::Connection;
use tracing::{info, instrument};

use cre_core::errors::CreResult;
use cre_core::models::{AgentId, Claim};

use cre_storage::audit::AuditLogger;
use cre_storage::queries::claim_ops;
use cre_storage::{format_ts, now};

use crate::trust::{clamp_confidence, TrustLedger};

/// Stateless claim operations.
pub struct ClaimStore;

impl ClaimStore {
    /// Append a claim and its audit entry. Confidence is clamped to `[0, 1]`.
    #[instrument(skip(conn, ledger))]
    pub fn submit(
        conn: &Connection,
        ledger: &TrustLedger,
        agent: &AgentId,
        entity: &str,
        value: &str,
        confidence: f64,
    ) -> CreResult<Claim> {
        let trust = ledger.get(conn, agent)?;
        let confidence = clamp_confidence(confidence);
        let timestamp = now();

        let id = claim_ops::insert_claim(
            conn,
            agent.as_str(),
            entity,
            value,
            confidence,
            trust,
            &format_ts(&timestamp),
        )?;
        AuditLogger::log_claim_added(conn, id, entity, agent.as_str(), value, confidence)?;

        info!(claim_id = id, entity, agent = %agent, trust, "claim stored");
        Ok(Claim {
            id,
            agent_id: agent.clone(),
            entity: entity.to_string(),
            value: value.to_string(),
            confidence,
            trust_at_submission: trust,
            timestamp,
            settled_by: None,
        })
    }

    /// All claims for an entity in submission order. May be empty.
    pub fn claims_for(conn: &Connection, entity: &str) -> CreResult<Vec<Claim>> {
        claim_ops::claims_for_entity(conn, entity)
    }
}
