use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A human-authorized value that pre-empts consensus for one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OverrideRecord {
    pub entity: String,
    pub value: String,
    pub reason: String,
    /// Identity id of the HUMAN_ADMIN who installed the override.
    pub issued_by: String,
    pub created_at: DateTime<Utc>,
}
