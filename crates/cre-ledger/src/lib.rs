//! # cre-ledger
//!
//! The claim resolution engine: claim store, trust ledger, consensus
//! resolver, governance overrides, the error-review penalty bridge, and the
//! [`ResolutionEngine`] that ties them to identity and storage.

pub mod claims;
pub mod consensus;
pub mod engine;
pub mod governance;
pub mod maintenance;
pub mod resolution;
pub mod review;
pub mod tracing_setup;
pub mod trust;

pub use engine::{MaintenanceReport, ResolutionEngine};
pub use maintenance::{MaintenanceHandle, MaintenanceScheduler};
