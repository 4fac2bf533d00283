//! Error handling for the claim resolution engine.
//! One error enum per subsystem, `thiserror` only, folded into [`CreError`].

pub mod config_error;
pub mod cre_error;
pub mod identity_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use cre_error::{CreError, CreResult};
pub use identity_error::IdentityError;
pub use storage_error::StorageError;
