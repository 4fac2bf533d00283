use serde::{Deserialize, Serialize};

use crate::models::Role;

/// Static identity entry. Public keys are base64 (standard alphabet).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    pub id: String,
    pub role: Role,
    pub public_key: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}
