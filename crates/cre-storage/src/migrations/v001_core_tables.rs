//! v001: claims, resolutions, trust, trust events, audit log.
//!
//! AUTOINCREMENT keeps row ids strictly increasing, which is the ordering key
//! for every log table.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS claims (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    agent_id            TEXT NOT NULL,
    entity              TEXT NOT NULL,
    value               TEXT NOT NULL,
    confidence          REAL NOT NULL,
    trust_at_submission REAL NOT NULL,
    timestamp           TEXT NOT NULL,
    settled_by          INTEGER
);

CREATE INDEX IF NOT EXISTS idx_claims_entity ON claims(entity, id);
CREATE INDEX IF NOT EXISTS idx_claims_agent ON claims(agent_id);

CREATE TABLE IF NOT EXISTS resolutions (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    entity    TEXT NOT NULL,
    value     TEXT,
    status    TEXT NOT NULL,
    reason    TEXT NOT NULL,
    timestamp TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_resolutions_entity ON resolutions(entity, id);

CREATE TABLE IF NOT EXISTS trust (
    agent_id     TEXT PRIMARY KEY,
    trust        REAL NOT NULL,
    last_updated TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS trust_events (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    agent_id   TEXT NOT NULL,
    change     REAL NOT NULL,
    reason     TEXT NOT NULL,
    confidence REAL NOT NULL,
    timestamp  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_trust_events_agent ON trust_events(agent_id, id);

CREATE TABLE IF NOT EXISTS audit_log (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    event_type TEXT NOT NULL,
    subject    TEXT NOT NULL,
    actor      TEXT NOT NULL,
    details    TEXT NOT NULL,
    timestamp  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_audit_subject ON audit_log(subject, id);
";
