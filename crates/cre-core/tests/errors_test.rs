use cre_core::errors::*;

#[test]
fn unauthenticated_carries_identity() {
    let err = IdentityError::Unauthenticated {
        identity: "ghost".into(),
    };
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn unauthorized_carries_reason() {
    let err = IdentityError::Unauthorized {
        identity: "Junior".into(),
        reason: "role mismatch".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("Junior"));
    assert!(msg.contains("role mismatch"));
}

#[test]
fn identity_error_converts_to_cre_error() {
    let err: CreError = IdentityError::InvalidSignature {
        reason: "bad length".into(),
    }
    .into();
    assert!(matches!(err, CreError::IdentityError(_)));
    assert!(err.is_auth_failure());
}

#[test]
fn storage_error_converts_to_cre_error() {
    let err: CreError = StorageError::SqliteError {
        message: "disk full".into(),
    }
    .into();
    assert!(matches!(err, CreError::StorageError(_)));
    assert!(!err.is_auth_failure());
}

#[test]
fn config_error_converts_to_cre_error() {
    let err: CreError = ConfigError::ValidationFailed {
        field: "trust.decay_rate".into(),
        message: "out of range".into(),
    }
    .into();
    assert!(err.to_string().contains("trust.decay_rate"));
}

#[test]
fn rate_limited_carries_limit() {
    let err = CreError::RateLimited {
        identity: "Junior".into(),
        limit: 5,
    };
    let msg = err.to_string();
    assert!(msg.contains("Junior"));
    assert!(msg.contains('5'));
}

#[test]
fn migration_failed_carries_version() {
    let err = StorageError::MigrationFailed {
        version: 3,
        reason: "syntax".into(),
    };
    assert!(err.to_string().contains('3'));
}
