//! Data model shared by every crate in the workspace.

pub mod audit_entry;
pub mod claim;
pub mod error_review;
pub mod governance;
pub mod identity;
pub mod resolution;
pub mod trust;

pub use audit_entry::{AuditEntry, AuditEvent};
pub use claim::{AgentId, Claim, ClaimRequest};
pub use error_review::{ErrorReview, PenaltyEvent};
pub use governance::OverrideRecord;
pub use identity::{Action, Identity, Role};
pub use resolution::{Resolution, ResolutionStatus};
pub use trust::{TrustEvent, TrustRecord, TrustTimelinePoint};
