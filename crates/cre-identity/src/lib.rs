//! # cre-identity
//!
//! Who may submit claims and overrides: the identity registry, Ed25519
//! signature verification over canonical payloads, and per-identity claim
//! quotas.

pub mod canonical;
pub mod rate_limit;
pub mod registry;
pub mod signature;

pub use rate_limit::ClaimRateLimiter;
pub use registry::IdentityRegistry;
pub use signature::SignatureVerifier;
