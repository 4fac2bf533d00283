//! Schema migrations using PRAGMA user_version.

pub mod v001_core_tables;
pub mod v002_governance_tables;
pub mod v003_error_review_tables;

use rusqlite::Connection;

use cre_core::errors::{CreResult, StorageError};

/// Latest schema version known to this build.
pub const LATEST_VERSION: u32 = 3;

/// Run all pending migrations in order. Each migration runs in its own
/// transaction together with its user_version bump.
pub fn run_migrations(conn: &Connection) -> CreResult<u32> {
    let current = current_version(conn)?;

    let migrations: &[(&str, u32)] = &[
        (v001_core_tables::MIGRATION_SQL, 1),
        (v002_governance_tables::MIGRATION_SQL, 2),
        (v003_error_review_tables::MIGRATION_SQL, 3),
    ];

    let mut applied = 0;
    for (sql, version) in migrations {
        if current >= *version {
            continue;
        }
        let failed = |e: rusqlite::Error| StorageError::MigrationFailed {
            version: *version,
            reason: e.to_string(),
        };
        let tx = conn.unchecked_transaction().map_err(failed)?;
        tx.execute_batch(sql).map_err(failed)?;
        tx.pragma_update(None, "user_version", version).map_err(failed)?;
        tx.commit().map_err(failed)?;
        tracing::info!(version = version, "applied migration");
        applied += 1;
    }

    Ok(applied)
}

/// Get the current schema version.
pub fn current_version(conn: &Connection) -> CreResult<u32> {
    let version = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    Ok(version)
}
