//! Live human overrides, at most one per entity.

use rusqlite::{params, Connection, OptionalExtension};

use cre_core::errors::CreResult;
use cre_core::models::OverrideRecord;

use crate::{format_ts, parse_ts, to_storage_err};

pub fn get_override(conn: &Connection, entity: &str) -> CreResult<Option<OverrideRecord>> {
    let row = conn
        .query_row(
            "SELECT entity, value, reason, issued_by, created_at FROM overrides WHERE entity = ?1",
            params![entity],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match row {
        Some((entity, value, reason, issued_by, created_at)) => Ok(Some(OverrideRecord {
            entity,
            value,
            reason,
            issued_by,
            created_at: parse_ts("overrides", &created_at)?,
        })),
        None => Ok(None),
    }
}

/// Install or replace the override for `record.entity`.
pub fn upsert_override(conn: &Connection, record: &OverrideRecord) -> CreResult<()> {
    conn.execute(
        "INSERT INTO overrides (entity, value, reason, issued_by, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(entity) DO UPDATE SET
            value = excluded.value,
            reason = excluded.reason,
            issued_by = excluded.issued_by,
            created_at = excluded.created_at",
        params![
            record.entity,
            record.value,
            record.reason,
            record.issued_by,
            format_ts(&record.created_at),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Remove the override. Returns false if none existed.
pub fn delete_override(conn: &Connection, entity: &str) -> CreResult<bool> {
    let removed = conn
        .execute("DELETE FROM overrides WHERE entity = ?1", params![entity])
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(removed > 0)
}
