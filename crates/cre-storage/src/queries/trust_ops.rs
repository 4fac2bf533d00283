//! Trust table and the trust event log.

use rusqlite::{params, Connection, OptionalExtension};

use cre_core::errors::CreResult;
use cre_core::models::{AgentId, TrustEvent, TrustRecord};

use crate::{parse_ts, to_storage_err};

/// Stored trust for an agent, `None` if the agent has never been scored.
pub fn get_trust(conn: &Connection, agent_id: &str) -> CreResult<Option<TrustRecord>> {
    let row = conn
        .query_row(
            "SELECT agent_id, trust, last_updated FROM trust WHERE agent_id = ?1",
            params![agent_id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match row {
        Some((agent_id, trust, last_updated)) => Ok(Some(TrustRecord {
            agent_id: AgentId(agent_id),
            trust,
            last_updated: parse_ts("trust", &last_updated)?,
        })),
        None => Ok(None),
    }
}

pub fn upsert_trust(
    conn: &Connection,
    agent_id: &str,
    trust: f64,
    last_updated: &str,
) -> CreResult<()> {
    conn.execute(
        "INSERT INTO trust (agent_id, trust, last_updated) VALUES (?1, ?2, ?3)
         ON CONFLICT(agent_id) DO UPDATE SET
            trust = excluded.trust,
            last_updated = excluded.last_updated",
        params![agent_id, trust, last_updated],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Every stored trust row, ordered by agent id.
pub fn list_trust(conn: &Connection) -> CreResult<Vec<TrustRecord>> {
    let mut stmt = conn
        .prepare_cached("SELECT agent_id, trust, last_updated FROM trust ORDER BY agent_id ASC")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, f64>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut records = Vec::new();
    for row in rows {
        let (agent_id, trust, last_updated) = row.map_err(|e| to_storage_err(e.to_string()))?;
        records.push(TrustRecord {
            agent_id: AgentId(agent_id),
            trust,
            last_updated: parse_ts("trust", &last_updated)?,
        });
    }
    Ok(records)
}

/// Append a trust event and return its id.
pub fn insert_trust_event(
    conn: &Connection,
    agent_id: &str,
    change: f64,
    reason: &str,
    confidence: f64,
    timestamp: &str,
) -> CreResult<i64> {
    conn.execute(
        "INSERT INTO trust_events (agent_id, change, reason, confidence, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![agent_id, change, reason, confidence, timestamp],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

/// Trust events newest-first.
pub fn list_trust_events(conn: &Connection, limit: usize, offset: usize) -> CreResult<Vec<TrustEvent>> {
    query_events(
        conn,
        "SELECT id, agent_id, change, reason, confidence, timestamp
         FROM trust_events ORDER BY id DESC LIMIT ?1 OFFSET ?2",
        params![limit, offset],
    )
}

/// All events for one agent, oldest first.
pub fn events_for_agent(conn: &Connection, agent_id: &str) -> CreResult<Vec<TrustEvent>> {
    query_events(
        conn,
        "SELECT id, agent_id, change, reason, confidence, timestamp
         FROM trust_events WHERE agent_id = ?1 ORDER BY id ASC",
        params![agent_id],
    )
}

fn query_events(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> CreResult<Vec<TrustEvent>> {
    let mut stmt = conn
        .prepare_cached(sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params, |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, f64>(4)?,
                row.get::<_, String>(5)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut events = Vec::new();
    for row in rows {
        let (id, agent_id, change, reason, confidence, ts) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        events.push(TrustEvent {
            id,
            agent_id: AgentId(agent_id),
            change,
            reason,
            confidence,
            timestamp: parse_ts("trust_events", &ts)?,
        });
    }
    Ok(events)
}
