//! AuditLogger: append-only audit rows written on the caller's connection,
//! so they commit or roll back with the mutation they describe.

use rusqlite::Connection;

use cre_core::errors::CreResult;
use cre_core::models::{AuditEvent, OverrideRecord};

use crate::{format_ts, now};
use crate::queries::audit_ops;

/// Stateless audit writer.
pub struct AuditLogger;

impl AuditLogger {
    /// Log an arbitrary audit event.
    pub fn log(
        conn: &Connection,
        event: AuditEvent,
        subject: &str,
        actor: &str,
        details: serde_json::Value,
    ) -> CreResult<i64> {
        audit_ops::insert_audit_entry(conn, event, subject, actor, &details, &format_ts(&now()))
    }

    pub fn log_claim_added(
        conn: &Connection,
        claim_id: i64,
        entity: &str,
        agent: &str,
        value: &str,
        confidence: f64,
    ) -> CreResult<i64> {
        Self::log(
            conn,
            AuditEvent::ClaimAdded,
            entity,
            agent,
            serde_json::json!({
                "claim_id": claim_id,
                "value": value,
                "confidence": confidence,
            }),
        )
    }

    /// Override installed or replaced; records both states.
    pub fn log_override_set(
        conn: &Connection,
        previous: Option<&OverrideRecord>,
        current: &OverrideRecord,
        payload_digest: &str,
    ) -> CreResult<i64> {
        Self::log(
            conn,
            AuditEvent::OverrideSet,
            &current.entity,
            &current.issued_by,
            serde_json::json!({
                "previous": previous,
                "new": current,
                "payload_digest": payload_digest,
            }),
        )
    }

    pub fn log_override_cleared(
        conn: &Connection,
        previous: &OverrideRecord,
        actor: &str,
        payload_digest: &str,
    ) -> CreResult<i64> {
        Self::log(
            conn,
            AuditEvent::OverrideCleared,
            &previous.entity,
            actor,
            serde_json::json!({
                "previous": previous,
                "new": serde_json::Value::Null,
                "payload_digest": payload_digest,
            }),
        )
    }

    /// A resolution was answered by a live override instead of consensus.
    pub fn log_override_used(
        conn: &Connection,
        record: &OverrideRecord,
        resolution_id: i64,
    ) -> CreResult<i64> {
        Self::log(
            conn,
            AuditEvent::OverrideUsed,
            &record.entity,
            &record.issued_by,
            serde_json::json!({
                "resolution_id": resolution_id,
                "value": record.value,
                "reason": record.reason,
            }),
        )
    }
}
