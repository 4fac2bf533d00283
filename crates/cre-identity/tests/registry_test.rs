//! Identity registry authentication.

use cre_core::config::IdentityConfig;
use cre_core::errors::{ConfigError, CreError, IdentityError};
use cre_core::models::{Action, Role};
use cre_identity::IdentityRegistry;

const JUNIOR_PUBLIC: &str = "xtyXT9YG6S0iQHBXVvvcSyVgb/MDIo1nvvBOP9+lc/g=";

fn entry(id: &str, role: Role, active: bool) -> IdentityConfig {
    IdentityConfig {
        id: id.to_string(),
        role,
        public_key: JUNIOR_PUBLIC.to_string(),
        active,
    }
}

fn registry() -> IdentityRegistry {
    IdentityRegistry::from_config(&[
        entry("Junior", Role::Agent, true),
        entry("Admin", Role::HumanAdmin, true),
        entry("Retired", Role::Agent, false),
    ])
    .unwrap()
}

#[test]
fn authenticates_matching_role() {
    let reg = registry();
    assert_eq!(reg.len(), 3);
    let identity = reg.authenticate("Junior", Role::Agent).unwrap();
    assert_eq!(identity.role, Role::Agent);
    assert!(reg.authenticate("Admin", Role::HumanAdmin).is_ok());
}

#[test]
fn unknown_or_empty_identity_is_unauthenticated() {
    let reg = registry();
    for id in ["Ghost", ""] {
        let err = reg.authenticate(id, Role::Agent).unwrap_err();
        assert!(matches!(
            err,
            CreError::IdentityError(IdentityError::Unauthenticated { .. })
        ));
        assert!(err.is_auth_failure());
    }
}

#[test]
fn role_mismatch_and_inactive_are_unauthorized() {
    let reg = registry();
    let cases = [("Junior", Role::HumanAdmin), ("Admin", Role::Agent), ("Retired", Role::Agent)];
    for (id, role) in cases {
        let err = reg.authenticate(id, role).unwrap_err();
        assert!(
            matches!(err, CreError::IdentityError(IdentityError::Unauthorized { .. })),
            "{id} as {role}"
        );
    }
}

#[test]
fn toggling_active() {
    let reg = registry();
    reg.set_active("Retired", true).unwrap();
    assert!(reg.authenticate("Retired", Role::Agent).is_ok());
    reg.set_active("Junior", false).unwrap();
    assert!(reg.authenticate("Junior", Role::Agent).is_err());
    assert!(matches!(
        reg.set_active("Ghost", true),
        Err(CreError::NotFound { .. })
    ));
}

#[test]
fn bad_key_in_config_is_a_config_error() {
    let mut bad = entry("Junior", Role::Agent, true);
    bad.public_key = "AAAA".to_string();
    let err = IdentityRegistry::from_config(&[bad]).unwrap_err();
    assert!(matches!(
        err,
        CreError::ConfigError(ConfigError::ValidationFailed { .. })
    ));
}

#[test]
fn authorize_follows_role_matrix() {
    let reg = registry();
    assert!(reg.authorize("Junior", Action::Claim).is_ok());
    assert!(reg.authorize("Admin", Action::Claim).is_ok());
    assert!(reg.authorize("Admin", Action::Override).is_ok());
    let err = reg.authorize("Junior", Action::Override).unwrap_err();
    assert!(matches!(err, CreError::IdentityError(IdentityError::Unauthorized { .. })));
    assert!(reg.authorize("Retired", Action::Claim).is_err());
    assert!(reg.authorize("Ghost", Action::Claim).is_err());
}
