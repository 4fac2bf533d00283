//! Identities bound to Ed25519 public keys.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::PUBLIC_KEY_LEN;
use crate::errors::ConfigError;

/// Role of an identity. Roles are matched exactly, not hierarchically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Agent,
    HumanAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Agent => "AGENT",
            Role::HumanAdmin => "HUMAN_ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AGENT" => Ok(Role::Agent),
            "HUMAN_ADMIN" => Ok(Role::HumanAdmin),
            other => Err(ConfigError::ValidationFailed {
                field: "identities.role".to_string(),
                message: format!("unknown role '{other}'"),
            }),
        }
    }
}

/// Operations gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Claim,
    Override,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Claim => "CLAIM",
            Action::Override => "OVERRIDE",
        }
    }
}

impl Role {
    /// Role matrix: both roles may claim, only HUMAN_ADMIN may override.
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::Claim => true,
            Action::Override => matches!(self, Role::HumanAdmin),
        }
    }
}

/// A registered identity. Only public keys are ever stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub public_key: [u8; PUBLIC_KEY_LEN],
    pub role: Role,
    pub active: bool,
}
