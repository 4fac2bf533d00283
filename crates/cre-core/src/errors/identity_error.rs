/// Authentication and authorization failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// The identity id was missing or is not registered.
    #[error("unauthenticated: {identity}")]
    Unauthenticated { identity: String },

    /// The identity exists but may not perform the operation
    /// (inactive, role mismatch, or acting on behalf of another agent).
    #[error("unauthorized: {identity}: {reason}")]
    Unauthorized { identity: String, reason: String },

    /// The signature or key was malformed or did not verify.
    #[error("invalid signature: {reason}")]
    InvalidSignature { reason: String },
}
