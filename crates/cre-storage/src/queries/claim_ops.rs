//! Append-only claim log.

use rusqlite::{params, Connection, OptionalExtension, Row};

use cre_core::errors::CreResult;
use cre_core::models::{AgentId, Claim};

use crate::{parse_ts, to_storage_err};

const CLAIM_COLUMNS: &str =
    "id, agent_id, entity, value, confidence, trust_at_submission, timestamp, settled_by";

/// Raw claim row before timestamp parsing.
struct ClaimRow {
    id: i64,
    agent_id: String,
    entity: String,
    value: String,
    confidence: f64,
    trust_at_submission: f64,
    timestamp: String,
    settled_by: Option<i64>,
}

impl ClaimRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            agent_id: row.get(1)?,
            entity: row.get(2)?,
            value: row.get(3)?,
            confidence: row.get(4)?,
            trust_at_submission: row.get(5)?,
            timestamp: row.get(6)?,
            settled_by: row.get(7)?,
        })
    }

    fn into_claim(self) -> CreResult<Claim> {
        Ok(Claim {
            id: self.id,
            agent_id: AgentId(self.agent_id),
            entity: self.entity,
            value: self.value,
            confidence: self.confidence,
            trust_at_submission: self.trust_at_submission,
            timestamp: parse_ts("claims", &self.timestamp)?,
            settled_by: self.settled_by,
        })
    }
}

/// Append a claim and return its id.
pub fn insert_claim(
    conn: &Connection,
    agent_id: &str,
    entity: &str,
    value: &str,
    confidence: f64,
    trust_at_submission: f64,
    timestamp: &str,
) -> CreResult<i64> {
    conn.execute(
        "INSERT INTO claims (agent_id, entity, value, confidence, trust_at_submission, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![agent_id, entity, value, confidence, trust_at_submission, timestamp],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    let id = conn.last_insert_rowid();
    tracing::debug!(claim_id = id, entity, agent_id, "claim inserted");
    Ok(id)
}

pub fn get_claim(conn: &Connection, id: i64) -> CreResult<Option<Claim>> {
    let row = conn
        .query_row(
            &format!("SELECT {CLAIM_COLUMNS} FROM claims WHERE id = ?1"),
            params![id],
            ClaimRow::from_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(ClaimRow::into_claim).transpose()
}

/// All claims for an entity in submission order.
pub fn claims_for_entity(conn: &Connection, entity: &str) -> CreResult<Vec<Claim>> {
    query_claims(
        conn,
        &format!("SELECT {CLAIM_COLUMNS} FROM claims WHERE entity = ?1 ORDER BY id ASC"),
        entity,
    )
}

/// Claims for an entity that have not fed the trust ledger yet.
pub fn unsettled_claims_for_entity(conn: &Connection, entity: &str) -> CreResult<Vec<Claim>> {
    query_claims(
        conn,
        &format!(
            "SELECT {CLAIM_COLUMNS} FROM claims
             WHERE entity = ?1 AND settled_by IS NULL ORDER BY id ASC"
        ),
        entity,
    )
}

/// Mark the given claims as settled by a resolution. Already-settled claims
/// are left untouched. Returns the number of rows updated.
pub fn mark_settled(conn: &Connection, claim_ids: &[i64], resolution_id: i64) -> CreResult<usize> {
    let mut stmt = conn
        .prepare_cached("UPDATE claims SET settled_by = ?1 WHERE id = ?2 AND settled_by IS NULL")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut updated = 0;
    for id in claim_ids {
        updated += stmt
            .execute(params![resolution_id, id])
            .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(updated)
}

pub fn count_claims(conn: &Connection) -> CreResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM claims", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))
}

fn query_claims(conn: &Connection, sql: &str, entity: &str) -> CreResult<Vec<Claim>> {
    let mut stmt = conn
        .prepare_cached(sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![entity], ClaimRow::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut claims = Vec::new();
    for row in rows {
        let row = row.map_err(|e| to_storage_err(e.to_string()))?;
        claims.push(row.into_claim()?);
    }
    Ok(claims)
}
