//! # cre-core
//!
//! Foundation crate for the claim resolution engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::CreConfig;
pub use errors::{CreError, CreResult};
pub use models::{AgentId, Claim, Resolution, ResolutionStatus, TrustEvent};
