//! Narrow interfaces the external request layer routes through, so the
//! transport can be swapped without touching the engine.

pub mod claim_submitter;
pub mod resolver;
pub mod trust;

pub use claim_submitter::IClaimSubmitter;
pub use resolver::IResolver;
pub use trust::{ITrustReader, ITrustWriter};
