//! Deterministic trust-weighted consensus.

pub mod resolver;

pub use resolver::{resolve, ClaimVote, ConsensusOutcome};
