//! Human overrides that pre-empt consensus.

pub mod overrides;

pub use overrides::GovernanceOverride;
