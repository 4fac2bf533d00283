//! Audit log writer.

pub mod logger;

pub use logger::AuditLogger;
