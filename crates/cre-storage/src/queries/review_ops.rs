//! Error reviews and penalty events.

use rusqlite::{params, Connection};

use cre_core::errors::CreResult;
use cre_core::models::{AgentId, ErrorReview, PenaltyEvent};

use crate::{format_ts, parse_ts, to_storage_err};

/// Aggregate over the unconsumed reviews of one (target_agent, error_type)
/// pair for an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingReviewGroup {
    pub target_agent: String,
    pub error_type: String,
    pub review_count: usize,
    pub avg_confidence: f64,
    /// Highest review id in the group; consumption is bounded by it.
    pub max_review_id: i64,
}

/// Fields of a penalty event before it has an id.
#[derive(Debug, Clone)]
pub struct NewPenaltyEvent<'a> {
    pub agent_id: &'a str,
    pub entity: &'a str,
    pub error_type: &'a str,
    pub weight: f64,
    pub avg_confidence: f64,
    pub penalty_strength: f64,
    pub review_count: usize,
    pub reason: &'a str,
    pub timestamp: &'a str,
}

pub fn insert_review(conn: &Connection, review: &ErrorReview) -> CreResult<i64> {
    conn.execute(
        "INSERT INTO error_reviews
            (reviewer_agent, target_agent, entity, observed_value, expected_value,
             error_type, confidence, evidence, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            review.reviewer_agent.as_str(),
            review.target_agent.as_str(),
            review.entity,
            review.observed_value,
            review.expected_value,
            review.error_type,
            review.confidence,
            review.evidence,
            format_ts(&review.timestamp),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

/// Unconsumed review groups for an entity, in order of their first review.
pub fn pending_groups(conn: &Connection, entity: &str) -> CreResult<Vec<PendingReviewGroup>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT target_agent, error_type, COUNT(*), AVG(confidence), MAX(id)
             FROM error_reviews
             WHERE entity = ?1 AND consumed_by IS NULL
             GROUP BY target_agent, error_type
             ORDER BY MIN(id) ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![entity], |row| {
            Ok(PendingReviewGroup {
                target_agent: row.get(0)?,
                error_type: row.get(1)?,
                review_count: row.get::<_, i64>(2)? as usize,
                avg_confidence: row.get(3)?,
                max_review_id: row.get(4)?,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Entities that still have unconsumed reviews.
pub fn entities_with_pending_reviews(conn: &Connection) -> CreResult<Vec<String>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT DISTINCT entity FROM error_reviews
             WHERE consumed_by IS NULL ORDER BY entity ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Mark the unconsumed reviews of a group as consumed by a penalty event.
pub fn mark_consumed(
    conn: &Connection,
    entity: &str,
    group: &PendingReviewGroup,
    penalty_event_id: i64,
) -> CreResult<usize> {
    conn.execute(
        "UPDATE error_reviews SET consumed_by = ?1
         WHERE entity = ?2 AND target_agent = ?3 AND error_type = ?4
           AND consumed_by IS NULL AND id <= ?5",
        params![
            penalty_event_id,
            entity,
            group.target_agent,
            group.error_type,
            group.max_review_id,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn count_reviews(conn: &Connection, entity: &str) -> CreResult<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM error_reviews WHERE entity = ?1",
        params![entity],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn insert_penalty_event(conn: &Connection, event: &NewPenaltyEvent<'_>) -> CreResult<i64> {
    conn.execute(
        "INSERT INTO error_penalty_events
            (agent_id, entity, error_type, weight, avg_confidence, penalty_strength,
             review_count, reason, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            event.agent_id,
            event.entity,
            event.error_type,
            event.weight,
            event.avg_confidence,
            event.penalty_strength,
            event.review_count as i64,
            event.reason,
            event.timestamp,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

/// Penalty events newest-first.
pub fn list_penalty_events(
    conn: &Connection,
    limit: usize,
    offset: usize,
) -> CreResult<Vec<PenaltyEvent>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, agent_id, entity, error_type, weight, avg_confidence,
                    penalty_strength, review_count, reason, timestamp
             FROM error_penalty_events ORDER BY id DESC LIMIT ?1 OFFSET ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![limit, offset], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, f64>(4)?,
                row.get::<_, f64>(5)?,
                row.get::<_, f64>(6)?,
                row.get::<_, i64>(7)?,
                row.get::<_, String>(8)?,
                row.get::<_, String>(9)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut events = Vec::new();
    for row in rows {
        let (id, agent_id, entity, error_type, weight, avg_confidence, strength, count, reason, ts) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        events.push(PenaltyEvent {
            id,
            agent_id: AgentId(agent_id),
            entity,
            error_type,
            weight,
            avg_confidence,
            penalty_strength: strength,
            review_count: count as usize,
            reason,
            timestamp: parse_ts("error_penalty_events", &ts)?,
        });
    }
    Ok(events)
}
