//! Error-review penalty bridge.

pub mod bridge;

pub use bridge::{ErrorReviewBridge, REASON_ERROR_REVIEW_PENALTY};
