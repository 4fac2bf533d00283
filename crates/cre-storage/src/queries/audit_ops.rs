//! Append-only audit log.

use rusqlite::{params, Connection};

use cre_core::errors::{CreResult, StorageError};
use cre_core::models::{AuditEntry, AuditEvent};

use crate::{parse_ts, to_storage_err};

pub fn insert_audit_entry(
    conn: &Connection,
    event: AuditEvent,
    subject: &str,
    actor: &str,
    details: &serde_json::Value,
    timestamp: &str,
) -> CreResult<i64> {
    conn.execute(
        "INSERT INTO audit_log (event_type, subject, actor, details, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![event.as_str(), subject, actor, details.to_string(), timestamp],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

/// Audit entries newest-first.
pub fn list_audit(conn: &Connection, limit: usize, offset: usize) -> CreResult<Vec<AuditEntry>> {
    query_entries(
        conn,
        "SELECT id, event_type, subject, actor, details, timestamp
         FROM audit_log ORDER BY id DESC LIMIT ?1 OFFSET ?2",
        params![limit, offset],
    )
}

/// Audit entries about one subject, oldest first.
pub fn audit_for_subject(conn: &Connection, subject: &str) -> CreResult<Vec<AuditEntry>> {
    query_entries(
        conn,
        "SELECT id, event_type, subject, actor, details, timestamp
         FROM audit_log WHERE subject = ?1 ORDER BY id ASC",
        params![subject],
    )
}

fn query_entries(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> CreResult<Vec<AuditEntry>> {
    let mut stmt = conn
        .prepare_cached(sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params, |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut entries = Vec::new();
    for row in rows {
        let (id, event, subject, actor, details, ts) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        let details: serde_json::Value = serde_json::from_str(&details).map_err(|e| StorageError::CorruptRow {
            table: "audit_log".to_string(),
            details: format!("entry {id}: {e}"),
        })?;
        entries.push(AuditEntry {
            id,
            event: event.parse()?,
            subject,
            actor,
            details,
            timestamp: parse_ts("audit_log", &ts)?,
        });
    }
    Ok(entries)
}
