//! Engine configuration. Every section deserializes with `#[serde(default)]`,
//! so an empty TOML document yields the compiled defaults.

pub mod cre_config;
pub mod identity_config;
pub mod review_config;
pub mod security_config;
pub mod storage_config;
pub mod trust_config;

pub use cre_config::CreConfig;
pub use identity_config::IdentityConfig;
pub use review_config::ReviewConfig;
pub use security_config::{SecurityConfig, SignatureMode};
pub use storage_config::StorageConfig;
pub use trust_config::TrustConfig;
