//! v003: error reviews and the penalty events derived from them.
//!
//! `consumed_by` points at the penalty event that consumed a review, so a
//! review contributes to at most one penalty.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS error_reviews (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    reviewer_agent TEXT NOT NULL,
    target_agent   TEXT NOT NULL,
    entity         TEXT NOT NULL,
    observed_value TEXT NOT NULL,
    expected_value TEXT NOT NULL,
    error_type     TEXT NOT NULL,
    confidence     REAL NOT NULL,
    evidence       TEXT,
    timestamp      TEXT NOT NULL,
    consumed_by    INTEGER REFERENCES error_penalty_events(id)
);

CREATE INDEX IF NOT EXISTS idx_error_reviews_pending
    ON error_reviews(entity, consumed_by, target_agent, error_type);

CREATE TABLE IF NOT EXISTS error_penalty_events (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    agent_id         TEXT NOT NULL,
    entity           TEXT NOT NULL,
    error_type       TEXT NOT NULL,
    weight           REAL NOT NULL,
    avg_confidence   REAL NOT NULL,
    penalty_strength REAL NOT NULL,
    review_count     INTEGER NOT NULL,
    reason           TEXT NOT NULL,
    timestamp        TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_penalty_events_agent ON error_penalty_events(agent_id, id);
";
