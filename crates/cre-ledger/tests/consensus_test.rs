//! Consensus resolver: golden cases and properties.

use std::str::FromStr;

use proptest::prelude::*;

use cre_core::models::ResolutionStatus;
use cre_ledger::consensus::resolver::{group_scores, REASON_UNANIMOUS};
use cre_ledger::consensus::{resolve, ClaimVote};

#[test]
fn golden_cases() {
    for case in test_fixtures::consensus_cases() {
        let votes: Vec<ClaimVote<'_>> = case
            .claims
            .iter()
            .map(|c| ClaimVote {
                value: &c.value,
                confidence: c.confidence,
                trust: c.trust,
            })
            .collect();
        let outcome = resolve(&votes);
        assert_eq!(
            outcome.status,
            ResolutionStatus::from_str(&case.expected_status).unwrap(),
            "{}",
            case.name
        );
        assert_eq!(outcome.value, case.expected_value, "{}", case.name);
        assert_eq!(outcome.reason, case.expected_reason, "{}", case.name);
    }
}

fn vote_strategy() -> impl Strategy<Value = (u8, f64, f64)> {
    (0u8..4, 0.0f64..=1.0, 0.05f64..=1.0)
}

const VALUES: [&str; 4] = ["a", "b", "c", "d"];

proptest! {
    #[test]
    fn one_value_always_resolves_to_it(
        votes in prop::collection::vec((0.0f64..=1.0, 0.05f64..=1.0), 1..12)
    ) {
        let votes: Vec<ClaimVote<'_>> = votes
            .iter()
            .map(|(c, t)| ClaimVote { value: "same", confidence: *c, trust: *t })
            .collect();
        let outcome = resolve(&votes);
        prop_assert_eq!(outcome.status, ResolutionStatus::Resolved);
        prop_assert_eq!(outcome.value.as_deref(), Some("same"));
        if votes.len() > 1 {
            prop_assert_eq!(outcome.reason, REASON_UNANIMOUS);
        }
    }

    #[test]
    fn resolved_only_with_margin(raw in prop::collection::vec(vote_strategy(), 2..16)) {
        let votes: Vec<ClaimVote<'_>> = raw
            .iter()
            .map(|(v, c, t)| ClaimVote { value: VALUES[*v as usize], confidence: *c, trust: *t })
            .collect();
        let mut scores: Vec<f64> = group_scores(&votes).into_iter().map(|(_, s)| s).collect();
        prop_assume!(scores.len() >= 2);
        scores.sort_by(|a, b| b.total_cmp(a));

        let outcome = resolve(&votes);
        if scores[0] >= 1.2 * scores[1] {
            prop_assert_eq!(outcome.status, ResolutionStatus::Resolved);
            prop_assert!(outcome.value.is_some());
        } else {
            prop_assert_eq!(outcome.status, ResolutionStatus::Contested);
            prop_assert!(outcome.value.is_none());
        }
    }

    #[test]
    fn same_input_same_outcome(raw in prop::collection::vec(vote_strategy(), 0..16)) {
        let votes: Vec<ClaimVote<'_>> = raw
            .iter()
            .map(|(v, c, t)| ClaimVote { value: VALUES[*v as usize], confidence: *c, trust: *t })
            .collect();
        let first = serde_json::to_string(&resolve(&votes)).unwrap();
        let second = serde_json::to_string(&resolve(&votes)).unwrap();
        prop_assert_eq!(first, second);
    }
}
