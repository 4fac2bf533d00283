//! Resolution history. One row per `resolve` call.

use rusqlite::{params, Connection};

use cre_core::errors::CreResult;
use cre_core::models::{Resolution, ResolutionStatus};

use crate::{parse_ts, to_storage_err};

pub fn insert_resolution(
    conn: &Connection,
    entity: &str,
    value: Option<&str>,
    status: ResolutionStatus,
    reason: &str,
    timestamp: &str,
) -> CreResult<i64> {
    conn.execute(
        "INSERT INTO resolutions (entity, value, status, reason, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![entity, value, status.as_str(), reason, timestamp],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

/// Most recent resolutions for an entity, newest first.
pub fn resolutions_for_entity(
    conn: &Connection,
    entity: &str,
    limit: usize,
) -> CreResult<Vec<Resolution>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, entity, value, status, reason, timestamp FROM resolutions
             WHERE entity = ?1 ORDER BY id DESC LIMIT ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![entity, limit], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut resolutions = Vec::new();
    for row in rows {
        let (id, entity, value, status, reason, ts) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        resolutions.push(Resolution {
            id,
            entity,
            value,
            status: status.parse()?,
            reason,
            timestamp: parse_ts("resolutions", &ts)?,
        });
    }
    Ok(resolutions)
}
