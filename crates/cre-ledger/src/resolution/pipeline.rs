//! One `resolve(entity)` call, run inside a single writer transaction.
//!
//! 1. A live override answers immediately (`human_override`, no feedback).
//! 2. Otherwise consensus runs over every claim for the entity.
//! 3. A `resolved` outcome settles the entity's unsettled claims: matching
//!    claimants are rewarded, the rest penalized, each claim exactly once.
//! 4. A resolution row is appended on every call, whatever the outcome.

use rusqlite::Connection;
use tracing::{info, instrument};

use cre_core::errors::CreResult;
use cre_core::models::{AuditEvent, Resolution, ResolutionStatus};

use cre_storage::audit::AuditLogger;
use cre_storage::queries::{claim_ops, resolution_ops};
use cre_storage::{format_ts, now};

use crate::consensus::{self, ClaimVote};
use crate::governance::GovernanceOverride;
use crate::trust::TrustLedger;

#[instrument(skip(conn, ledger))]
pub fn resolve_entity(conn: &Connection, ledger: &TrustLedger, entity: &str) -> CreResult<Resolution> {
    let timestamp = now();
    let ts = format_ts(&timestamp);

    if let Some(record) = GovernanceOverride::check(conn, entity)? {
        let id = resolution_ops::insert_resolution(
            conn,
            entity,
            Some(&record.value),
            ResolutionStatus::HumanOverride,
            &record.reason,
            &ts,
        )?;
        AuditLogger::log_override_used(conn, &record, id)?;
        info!(entity, resolution_id = id, "resolved by override");
        return Ok(Resolution {
            id,
            entity: entity.to_string(),
            value: Some(record.value),
            status: ResolutionStatus::HumanOverride,
            reason: record.reason,
            timestamp,
        });
    }

    let claims = claim_ops::claims_for_entity(conn, entity)?;
    let votes: Vec<ClaimVote<'_>> = claims.iter().map(ClaimVote::from).collect();
    let outcome = consensus::resolve(&votes);

    let id = resolution_ops::insert_resolution(
        conn,
        entity,
        outcome.value.as_deref(),
        outcome.status,
        outcome.reason,
        &ts,
    )?;

    let settled = match (&outcome.status, &outcome.value) {
        (ResolutionStatus::Resolved, Some(value)) => settle(conn, ledger, entity, value, id)?,
        _ => 0,
    };

    AuditLogger::log(
        conn,
        AuditEvent::ConsensusResult,
        entity,
        "system",
        serde_json::json!({
            "resolution_id": id,
            "status": outcome.status,
            "value": outcome.value,
            "reason": outcome.reason,
            "scores": outcome.scores,
            "claims": claims.len(),
            "settled": settled,
        }),
    )?;

    info!(entity, resolution_id = id, status = %outcome.status, settled, "entity resolved");
    Ok(Resolution {
        id,
        entity: entity.to_string(),
        value: outcome.value,
        status: outcome.status,
        reason: outcome.reason.to_string(),
        timestamp,
    })
}

/// Feed the entity's unsettled claims into the trust ledger and mark them
/// settled.
fn settle(
    conn: &Connection,
    ledger: &TrustLedger,
    entity: &str,
    resolved_value: &str,
    resolution_id: i64,
) -> CreResult<usize> {
    let mut settled = Vec::new();
    for claim in claim_ops::unsettled_claims_for_entity(conn, entity)? {
        let correct = claim.value == resolved_value;
        ledger.update(conn, &claim.agent_id, correct, claim.confidence)?;
        settled.push(claim.id);
    }
    claim_ops::mark_settled(conn, &settled, resolution_id)
}
