//! # cre-storage
//!
//! SQLite persistence for claims, resolutions, trust, trust events, overrides,
//! error reviews, penalty events, and the audit log. One writer connection
//! serializes every mutation; file-backed databases read through a pool.

pub mod audit;
pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use cre_core::errors::{CreError, CreResult, StorageError};

pub use engine::StorageEngine;

/// Convert a rusqlite (or any) error message into a storage error.
pub fn to_storage_err(message: String) -> CreError {
    StorageError::SqliteError { message }.into()
}

/// Current time at the precision the store keeps, so returned records equal
/// what a later read yields.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Fixed-width RFC 3339 so stored timestamps sort lexicographically.
pub fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a timestamp written by [`format_ts`].
pub fn parse_ts(table: &str, raw: &str) -> CreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            StorageError::CorruptRow {
                table: table.to_string(),
                details: format!("bad timestamp '{raw}': {e}"),
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_fixed_width_and_round_trip() {
        let ts = DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let formatted = format_ts(&ts);
        assert_eq!(formatted, "2026-01-02T03:04:05.000000Z");
        assert_eq!(parse_ts("t", &formatted).unwrap(), ts);
    }

    #[test]
    fn now_survives_storage() {
        let ts = now();
        assert_eq!(parse_ts("t", &format_ts(&ts)).unwrap(), ts);
    }

    #[test]
    fn corrupt_timestamp_is_reported() {
        assert!(parse_ts("claims", "yesterday").is_err());
    }
}
