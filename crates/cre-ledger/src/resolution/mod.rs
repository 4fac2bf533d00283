//! The resolution path: override check, consensus, feedback, history.

pub mod pipeline;

pub use pipeline::resolve_entity;
