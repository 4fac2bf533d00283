//! v002: human override table. One active override per entity.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS overrides (
    entity     TEXT PRIMARY KEY,
    value      TEXT NOT NULL,
    reason     TEXT NOT NULL,
    issued_by  TEXT NOT NULL,
    created_at TEXT NOT NULL
);
";
