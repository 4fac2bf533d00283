//! GovernanceOverride: at most one live override per entity.
//!
//! An override answers every resolution of its entity until cleared,
//! whatever claims arrive in the meantime.

use rusqlite::Connection;
use tracing::{info, instrument};

use cre_core::errors::CreResult;
use cre_core::models::OverrideRecord;

use cre_storage::audit::AuditLogger;
use cre_storage::now;
use cre_storage::queries::override_ops;

/// Stateless override operations. Role checks happen upstream.
pub struct GovernanceOverride;

impl GovernanceOverride {
    /// Install or replace the override, auditing previous and new state.
    #[instrument(skip(conn, reason, payload_digest))]
    pub fn set(
        conn: &Connection,
        entity: &str,
        value: &str,
        reason: &str,
        issued_by: &str,
        payload_digest: &str,
    ) -> CreResult<OverrideRecord> {
        let previous = override_ops::get_override(conn, entity)?;
        let record = OverrideRecord {
            entity: entity.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
            issued_by: issued_by.to_string(),
            created_at: now(),
        };
        override_ops::upsert_override(conn, &record)?;
        AuditLogger::log_override_set(conn, previous.as_ref(), &record, payload_digest)?;

        info!(entity, value, issued_by, replaced = previous.is_some(), "override set");
        Ok(record)
    }

    /// Remove the override. Returns `false` and writes nothing if none existed.
    #[instrument(skip(conn, payload_digest))]
    pub fn clear(
        conn: &Connection,
        entity: &str,
        actor: &str,
        payload_digest: &str,
    ) -> CreResult<bool> {
        let Some(previous) = override_ops::get_override(conn, entity)? else {
            return Ok(false);
        };
        override_ops::delete_override(conn, entity)?;
        AuditLogger::log_override_cleared(conn, &previous, actor, payload_digest)?;

        info!(entity, actor, "override cleared");
        Ok(true)
    }

    /// The live override for an entity, if any.
    pub fn check(conn: &Connection, entity: &str) -> CreResult<Option<OverrideRecord>> {
        override_ops::get_override(conn, entity)
    }
}
