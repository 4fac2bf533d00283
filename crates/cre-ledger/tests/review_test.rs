//! Error reviews feeding trust penalties.

use chrono::Utc;

use cre_core::models::{AgentId, AuditEvent, ErrorReview};
use cre_core::traits::ITrustReader;
use cre_core::CreConfig;
use cre_ledger::review::REASON_ERROR_REVIEW_PENALTY;
use cre_ledger::ResolutionEngine;

fn engine() -> ResolutionEngine {
    ResolutionEngine::open_in_memory(CreConfig::default()).unwrap()
}

fn review(reviewer: &str, target: &str, error_type: &str, confidence: f64) -> ErrorReview {
    ErrorReview {
        reviewer_agent: AgentId::from(reviewer),
        target_agent: AgentId::from(target),
        entity: "API_PORT".to_string(),
        observed_value: "7000".to_string(),
        expected_value: "9000".to_string(),
        error_type: error_type.to_string(),
        confidence,
        evidence: Some("config/prod.toml".to_string()),
        timestamp: Utc::now(),
    }
}

#[tokio::test]
async fn single_review_below_quorum_is_pending() {
    let eng = engine();
    eng.record_error_review(&review("R1", "Junior", "FACT_ERROR", 0.9))
        .await
        .unwrap();

    let applied = eng.apply_error_penalties("API_PORT").await.unwrap();
    assert!(applied.is_empty());
    assert_eq!(eng.get_trust(&AgentId::from("Junior")).await.unwrap(), 0.1);
    assert!(eng.list_audit(10, 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn quorum_penalizes_once() {
    let eng = engine();
    eng.record_error_review(&review("R1", "Junior", "FACT_ERROR", 0.8))
        .await
        .unwrap();
    eng.record_error_review(&review("R2", "Junior", "FACT_ERROR", 0.9))
        .await
        .unwrap();

    let applied = eng.apply_error_penalties("API_PORT").await.unwrap();
    assert_eq!(applied.len(), 1);
    let event = &applied[0];
    assert_eq!(event.agent_id.as_str(), "Junior");
    assert_eq!(event.review_count, 2);
    assert_eq!(event.weight, 1.0);
    assert!((event.avg_confidence - 0.85).abs() < 1e-9);
    assert!((event.penalty_strength - 0.85).abs() < 1e-9);
    assert_eq!(event.reason, REASON_ERROR_REVIEW_PENALTY);

    let trust = eng.get_trust(&AgentId::from("Junior")).await.unwrap();
    assert!((trust - (0.1 - 0.05 * 0.85)).abs() < 1e-9);

    // Consumed reviews never fire again.
    assert!(eng.apply_error_penalties("API_PORT").await.unwrap().is_empty());
    assert_eq!(eng.list_penalty_events(10, 0).await.unwrap().len(), 1);

    let audit = eng.list_audit(10, 0).await.unwrap();
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].event, AuditEvent::PenaltiesApplied);
}

#[tokio::test]
async fn severity_weight_scales_strength() {
    let eng = engine();
    for reviewer in ["R1", "R2"] {
        eng.record_error_review(&review(reviewer, "Junior", "SPELLING_ERROR", 1.0))
            .await
            .unwrap();
    }
    let applied = eng.apply_error_penalties("API_PORT").await.unwrap();
    assert!((applied[0].penalty_strength - 0.1).abs() < 1e-9);
}

#[tokio::test]
async fn low_confidence_groups_stay_pending() {
    let eng = engine();
    eng.record_error_review(&review("R1", "Junior", "LOGIC_ERROR", 0.3))
        .await
        .unwrap();
    eng.record_error_review(&review("R2", "Junior", "LOGIC_ERROR", 0.5))
        .await
        .unwrap();

    assert!(eng.apply_error_penalties("API_PORT").await.unwrap().is_empty());

    // A looser threshold picks the same reviews up later.
    let applied = eng
        .apply_error_penalties_with("API_PORT", 2, 0.35)
        .await
        .unwrap();
    assert_eq!(applied.len(), 1);
    assert!((applied[0].penalty_strength - 0.4 * 0.8).abs() < 1e-9);
}

#[tokio::test]
async fn groups_are_split_by_agent_and_error_type() {
    let eng = engine();
    for reviewer in ["R1", "R2"] {
        eng.record_error_review(&review(reviewer, "Junior", "FACT_ERROR", 0.9))
            .await
            .unwrap();
        eng.record_error_review(&review(reviewer, "Senior", "UNLISTED", 0.9))
            .await
            .unwrap();
    }
    eng.record_error_review(&review("R3", "Junior", "FORMAT_ERROR", 0.9))
        .await
        .unwrap();

    let applied = eng.apply_error_penalties("API_PORT").await.unwrap();
    assert_eq!(applied.len(), 2);
    let senior = applied
        .iter()
        .find(|p| p.agent_id.as_str() == "Senior")
        .unwrap();
    assert_eq!(senior.weight, 0.5);
}

#[tokio::test]
async fn sweep_covers_every_entity() {
    let eng = engine();
    for entity in ["A", "B"] {
        for reviewer in ["R1", "R2"] {
            let mut r = review(reviewer, "Junior", "CODE_ERROR", 0.7);
            r.entity = entity.to_string();
            eng.record_error_review(&r).await.unwrap();
        }
    }
    let applied = eng.apply_pending_penalties().await.unwrap();
    assert_eq!(applied.len(), 2);
    assert!(eng.apply_pending_penalties().await.unwrap().is_empty());
}
