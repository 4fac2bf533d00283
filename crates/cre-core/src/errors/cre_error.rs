use super::{ConfigError, IdentityError, StorageError};

/// Top-level error for every engine operation.
///
/// A contested resolution is not an error: disagreement is surfaced as
/// [`ResolutionStatus::Contested`](crate::models::ResolutionStatus) data.
#[derive(Debug, thiserror::Error)]
pub enum CreError {
    #[error("identity error: {0}")]
    IdentityError(#[from] IdentityError),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    #[error("rate limit exceeded for {identity}: max {limit} claims per minute")]
    RateLimited { identity: String, limit: u32 },

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl CreError {
    /// Authentication and signature failures are surfaced immediately and
    /// never retried by the engine.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, CreError::IdentityError(_))
    }
}

pub type CreResult<T> = Result<T, CreError>;
