//! Append-only claim store.

pub mod store;

pub use store::ClaimStore;
