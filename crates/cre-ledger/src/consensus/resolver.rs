//! ConsensusResolver: turn competing claims into one outcome.
//!
//! Score per value = Σ(confidence × trust) over that value's claims.
//! The top value wins only if `top ≥ CONSENSUS_MARGIN × second`.
//!
//! Values are grouped in first-appearance order and summed in submission
//! order; ranking is a stable sort, so equal scores keep first-appearance
//! order and the same input always yields the same outcome.

use std::collections::HashMap;

use serde::Serialize;

use cre_core::constants::CONSENSUS_MARGIN;
use cre_core::models::{Claim, ResolutionStatus};

pub const REASON_NO_CLAIMS: &str = "no claims";
pub const REASON_SINGLE_CLAIM: &str = "single claim";
pub const REASON_UNANIMOUS: &str = "unanimous";
pub const REASON_WEIGHTED: &str = "trust-weighted consensus";
pub const REASON_NO_CLEAR_WINNER: &str = "no clear winner";

/// The part of a claim consensus looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClaimVote<'a> {
    pub value: &'a str,
    pub confidence: f64,
    pub trust: f64,
}

impl<'a> From<&'a Claim> for ClaimVote<'a> {
    fn from(claim: &'a Claim) -> Self {
        Self {
            value: &claim.value,
            confidence: claim.confidence,
            trust: claim.trust_at_submission,
        }
    }
}

/// Result of one consensus run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsensusOutcome {
    pub status: ResolutionStatus,
    pub value: Option<String>,
    pub reason: &'static str,
    /// Score per distinct value, in first-appearance order.
    pub scores: Vec<(String, f64)>,
}

impl ConsensusOutcome {
    fn new(status: ResolutionStatus, value: Option<&str>, reason: &'static str) -> Self {
        Self {
            status,
            value: value.map(str::to_string),
            reason,
            scores: Vec::new(),
        }
    }
}

/// Resolve a claim set. Pure and deterministic.
pub fn resolve(votes: &[ClaimVote<'_>]) -> ConsensusOutcome {
    match votes {
        [] => ConsensusOutcome::new(ResolutionStatus::Unknown, None, REASON_NO_CLAIMS),
        [only] => {
            let mut outcome =
                ConsensusOutcome::new(ResolutionStatus::Resolved, Some(only.value), REASON_SINGLE_CLAIM);
            outcome.scores = vec![(only.value.to_string(), only.confidence * only.trust)];
            outcome
        }
        _ => resolve_groups(votes),
    }
}

fn resolve_groups(votes: &[ClaimVote<'_>]) -> ConsensusOutcome {
    let scores = group_scores(votes);
    let owned_scores: Vec<(String, f64)> =
        scores.iter().map(|(v, s)| (v.to_string(), *s)).collect();

    if scores.len() == 1 {
        let mut outcome =
            ConsensusOutcome::new(ResolutionStatus::Resolved, Some(scores[0].0), REASON_UNANIMOUS);
        outcome.scores = owned_scores;
        return outcome;
    }

    let mut ranked = scores;
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    let (top_value, top) = ranked[0];
    let (_, second) = ranked[1];

    let mut outcome = if top >= CONSENSUS_MARGIN * second {
        ConsensusOutcome::new(ResolutionStatus::Resolved, Some(top_value), REASON_WEIGHTED)
    } else {
        ConsensusOutcome::new(ResolutionStatus::Contested, None, REASON_NO_CLEAR_WINNER)
    };
    outcome.scores = owned_scores;
    outcome
}

/// Σ(confidence × trust) per distinct value, in first-appearance order.
pub fn group_scores<'a>(votes: &[ClaimVote<'a>]) -> Vec<(&'a str, f64)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut scores: Vec<(&'a str, f64)> = Vec::new();
    for vote in votes {
        let weight = vote.confidence * vote.trust;
        match index.get(vote.value) {
            Some(&i) => scores[i].1 += weight,
            None => {
                index.insert(vote.value, scores.len());
                scores.push((vote.value, weight));
            }
        }
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(value: &str, confidence: f64, trust: f64) -> ClaimVote<'_> {
        ClaimVote {
            value,
            confidence,
            trust,
        }
    }

    #[test]
    fn api_port_scenario() {
        let votes = [vote("9000", 0.9, 0.9), vote("7000", 0.6, 0.2)];
        let outcome = resolve(&votes);
        assert_eq!(outcome.status, ResolutionStatus::Resolved);
        assert_eq!(outcome.value.as_deref(), Some("9000"));
        assert_eq!(outcome.reason, REASON_WEIGHTED);
        assert!((outcome.scores[0].1 - 0.81).abs() < 1e-12);
        assert!((outcome.scores[1].1 - 0.12).abs() < 1e-12);
    }

    #[test]
    fn grouping_keeps_first_appearance_order() {
        let votes = [vote("b", 0.1, 1.0), vote("a", 0.5, 1.0), vote("b", 0.1, 1.0)];
        let scores = group_scores(&votes);
        assert_eq!(scores.iter().map(|(v, _)| *v).collect::<Vec<_>>(), vec!["b", "a"]);
        assert!((scores[0].1 - 0.2).abs() < 1e-12);
    }

    #[test]
    fn contested_has_no_value() {
        let votes = [vote("x", 0.5, 0.5), vote("y", 0.5, 0.5)];
        let outcome = resolve(&votes);
        assert_eq!(outcome.status, ResolutionStatus::Contested);
        assert_eq!(outcome.value, None);
        assert_eq!(outcome.reason, REASON_NO_CLEAR_WINNER);
    }
}
