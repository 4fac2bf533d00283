use serde::{Deserialize, Serialize};

/// SQLite storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path. Default: "cre.db".
    pub db_path: String,
    /// Number of read connections for file-backed databases. Default: 4.
    pub read_pool_size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: "cre.db".to_string(),
            read_pool_size: 4,
        }
    }
}
