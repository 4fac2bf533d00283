//! Periodic background passes.

pub mod scheduler;

pub use scheduler::{MaintenanceHandle, MaintenanceScheduler};
