//! IdentityRegistry: identity id → (public key, role, active).

use dashmap::DashMap;
use tracing::{debug, instrument};

use cre_core::config::IdentityConfig;
use cre_core::errors::{ConfigError, CreError, CreResult, IdentityError};
use cre_core::models::{Action, Identity, Role};

use crate::signature::decode_public_key;

/// In-memory registry built from static configuration.
#[derive(Debug, Default)]
pub struct IdentityRegistry {
    identities: DashMap<String, Identity>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from `[[identities]]` entries, decoding every key.
    pub fn from_config(entries: &[IdentityConfig]) -> CreResult<Self> {
        let registry = Self::new();
        for entry in entries {
            let public_key =
                decode_public_key(&entry.public_key).map_err(|e| ConfigError::ValidationFailed {
                    field: format!("identities.{}.public_key", entry.id),
                    message: e.to_string(),
                })?;
            registry.register(Identity {
                id: entry.id.clone(),
                public_key,
                role: entry.role,
                active: entry.active,
            });
        }
        Ok(registry)
    }

    /// Insert or replace an identity.
    pub fn register(&self, identity: Identity) {
        debug!(identity = %identity.id, role = %identity.role, "identity registered");
        self.identities.insert(identity.id.clone(), identity);
    }

    pub fn get(&self, id: &str) -> Option<Identity> {
        self.identities.get(id).map(|entry| entry.value().clone())
    }

    /// Resolve an identity and check it may act in `expected_role`.
    #[instrument(skip(self))]
    pub fn authenticate(&self, identity_id: &str, expected_role: Role) -> CreResult<Identity> {
        let identity = self.lookup_active(identity_id)?;
        if identity.role != expected_role {
            return Err(unauthorized(
                identity_id,
                &format!("role {} required, identity has {}", expected_role, identity.role),
            ));
        }
        Ok(identity)
    }

    fn lookup_active(&self, identity_id: &str) -> CreResult<Identity> {
        if identity_id.is_empty() {
            return Err(IdentityError::Unauthenticated {
                identity: String::new(),
            }
            .into());
        }
        let identity = self
            .get(identity_id)
            .ok_or_else(|| IdentityError::Unauthenticated {
                identity: identity_id.to_string(),
            })?;
        if !identity.active {
            return Err(unauthorized(identity_id, "identity is inactive"));
        }
        Ok(identity)
    }

    /// Resolve an identity and check its role permits `action`.
    #[instrument(skip(self))]
    pub fn authorize(&self, identity_id: &str, action: Action) -> CreResult<Identity> {
        let identity = self.lookup_active(identity_id)?;
        if !identity.role.allows(action) {
            return Err(unauthorized(
                identity_id,
                &format!("role {} may not perform {}", identity.role, action.as_str()),
            ));
        }
        Ok(identity)
    }

    /// Toggle whether an identity may act.
    pub fn set_active(&self, identity_id: &str, active: bool) -> CreResult<()> {
        let mut entry = self
            .identities
            .get_mut(identity_id)
            .ok_or_else(|| CreError::NotFound {
                kind: "identity".to_string(),
                id: identity_id.to_string(),
            })?;
        entry.active = active;
        debug!(identity = identity_id, active, "identity activation changed");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

fn unauthorized(identity: &str, reason: &str) -> CreError {
    IdentityError::Unauthorized {
        identity: identity.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
