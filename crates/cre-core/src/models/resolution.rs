use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::StorageError;

/// Outcome category of a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    Resolved,
    Contested,
    Unknown,
    HumanOverride,
}

impl ResolutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionStatus::Resolved => "resolved",
            ResolutionStatus::Contested => "contested",
            ResolutionStatus::Unknown => "unknown",
            ResolutionStatus::HumanOverride => "human_override",
        }
    }
}

impl std::fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolutionStatus {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resolved" => Ok(ResolutionStatus::Resolved),
            "contested" => Ok(ResolutionStatus::Contested),
            "unknown" => Ok(ResolutionStatus::Unknown),
            "human_override" => Ok(ResolutionStatus::HumanOverride),
            other => Err(StorageError::CorruptRow {
                table: "resolutions".to_string(),
                details: format!("unknown status '{other}'"),
            }),
        }
    }
}

/// A point-in-time resolution snapshot. One is appended per `resolve` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Resolution {
    pub id: i64,
    pub entity: String,
    pub value: Option<String>,
    pub status: ResolutionStatus,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}
