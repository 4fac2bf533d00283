//! End-to-end engine behavior over an in-memory store.

use cre_core::config::SignatureMode;
use cre_core::errors::{CreError, IdentityError};
use cre_core::models::{AgentId, AuditEvent, ClaimRequest, ResolutionStatus};
use cre_core::traits::{IClaimSubmitter, IResolver, ITrustReader, ITrustWriter};
use cre_core::CreConfig;
use cre_ledger::ResolutionEngine;
use cre_storage::queries::trust_ops;
use test_fixtures::{config_with, TestSigner, JUNIOR_API_PORT_SIGNATURE};

struct Fixture {
    engine: ResolutionEngine,
    junior: TestSigner,
    senior: TestSigner,
    admin: TestSigner,
}

fn fixture_with(mutate: impl FnOnce(&mut CreConfig)) -> Fixture {
    cre_ledger::tracing_setup::init_tracing_with_filter("warn");
    let junior = TestSigner::junior();
    let senior = TestSigner::senior();
    let admin = TestSigner::admin();
    let mut config = config_with(&[&junior, &senior, &admin]);
    mutate(&mut config);
    Fixture {
        engine: ResolutionEngine::open_in_memory(config).expect("engine"),
        junior,
        senior,
        admin,
    }
}

fn fixture() -> Fixture {
    fixture_with(|_| {})
}

async fn seed_trust(engine: &ResolutionEngine, agent: &str, trust: f64) {
    engine
        .storage()
        .write(|conn| trust_ops::upsert_trust(conn, agent, trust, "2026-01-01T00:00:00.000000Z"))
        .await
        .unwrap();
}

fn is_identity_error(err: &CreError, check: fn(&IdentityError) -> bool) -> bool {
    match err {
        CreError::IdentityError(e) => check(e),
        _ => false,
    }
}

#[tokio::test]
async fn published_junior_signature_is_accepted() {
    let f = fixture();
    let (request, _) = f.junior.signed_claim("API_PORT", "7000", 0.6);
    let claim = f
        .engine
        .submit_claim(&request, "Junior", JUNIOR_API_PORT_SIGNATURE)
        .await
        .unwrap();
    assert_eq!(claim.value, "7000");
    assert_eq!(claim.trust_at_submission, 0.1);
    assert!(claim.id > 0);
}

#[tokio::test]
async fn externally_signed_unicode_claim_is_accepted() {
    let f = fixture();
    let request = ClaimRequest {
        agent: AgentId::from("Junior"),
        entity: "CITY".to_string(),
        value: "café 🚀".to_string(),
        confidence: 1e-05,
    };
    let signature =
        "anhEc2Ltc7YhDco4fmWVDnTyLU8SMN3R+Lc1OjFYd7QuYXOANR0ATGVhws7crZ7EjM/0x9M3kulbeS4py2LLDw==";
    let claim = f.engine.submit_claim(&request, "Junior", signature).await.unwrap();
    assert_eq!(claim.value, "café 🚀");
}

#[tokio::test]
async fn claim_rejections() {
    let f = fixture();
    let (request, signature) = f.junior.signed_claim("API_PORT", "7000", 0.6);

    let err = f.engine.submit_claim(&request, "Ghost", &signature).await.unwrap_err();
    assert!(is_identity_error(&err, |e| matches!(e, IdentityError::Unauthenticated { .. })));

    // Junior's signature presented by Senior.
    let err = f.engine.submit_claim(&request, "Senior", &signature).await.unwrap_err();
    assert!(is_identity_error(&err, |e| matches!(e, IdentityError::Unauthorized { .. })));

    let mut tampered = request.clone();
    tampered.value = "7001".to_string();
    let err = f.engine.submit_claim(&tampered, "Junior", &signature).await.unwrap_err();
    assert!(is_identity_error(&err, |e| matches!(e, IdentityError::InvalidSignature { .. })));

    let err = f.engine.submit_claim(&request, "Junior", "").await.unwrap_err();
    assert!(err.is_auth_failure());

    assert!(f.engine.claims_for("API_PORT").await.unwrap().is_empty());
}

#[tokio::test]
async fn senior_beats_junior_and_feedback_is_applied_once() {
    let f = fixture();
    seed_trust(&f.engine, "Senior", 0.9).await;
    seed_trust(&f.engine, "Junior", 0.2).await;

    let (senior_claim, senior_sig) = f.senior.signed_claim("API_PORT", "9000", 0.9);
    let (junior_claim, junior_sig) = f.junior.signed_claim("API_PORT", "7000", 0.6);
    f.engine.submit_claim(&senior_claim, "Senior", &senior_sig).await.unwrap();
    f.engine.submit_claim(&junior_claim, "Junior", &junior_sig).await.unwrap();

    let resolution = f.engine.resolve("API_PORT").await.unwrap();
    assert_eq!(resolution.status, ResolutionStatus::Resolved);
    assert_eq!(resolution.value.as_deref(), Some("9000"));
    assert_eq!(resolution.reason, "trust-weighted consensus");

    let senior = f.engine.get_trust(&AgentId::from("Senior")).await.unwrap();
    let junior = f.engine.get_trust(&AgentId::from("Junior")).await.unwrap();
    assert!((senior - 0.945).abs() < 1e-9);
    assert!((junior - 0.17).abs() < 1e-9);

    // Resolving again appends history but does not re-reward.
    f.engine.resolve("API_PORT").await.unwrap();
    assert_eq!(f.engine.list_trust_events(50, 0).await.unwrap().len(), 2);
    assert_eq!(f.engine.resolution_history("API_PORT", 10).await.unwrap().len(), 2);

    let claims = f.engine.claims_for("API_PORT").await.unwrap();
    assert!(claims.iter().all(|c| c.settled_by == Some(resolution.id)));

    // A claim arriving later is settled by the next resolution, alone.
    let (late, late_sig) = f.junior.signed_claim("API_PORT", "9000", 0.5);
    f.engine.submit_claim(&late, "Junior", &late_sig).await.unwrap();
    let next = f.engine.resolve("API_PORT").await.unwrap();
    assert_eq!(next.value.as_deref(), Some("9000"));

    let events = f.engine.list_trust_events(50, 0).await.unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].agent_id.as_str(), "Junior");
    assert!(events[0].change > 0.0);
    let junior = f.engine.get_trust(&AgentId::from("Junior")).await.unwrap();
    assert!((junior - 0.195).abs() < 1e-9);

    let claims = f.engine.claims_for("API_PORT").await.unwrap();
    assert_eq!(claims[0].settled_by, Some(resolution.id));
    assert_eq!(claims[2].settled_by, Some(next.id));
}

#[tokio::test]
async fn contested_and_unknown_give_no_feedback() {
    let f = fixture();
    let unknown = f.engine.resolve("NOTHING").await.unwrap();
    assert_eq!(unknown.status, ResolutionStatus::Unknown);
    assert_eq!(unknown.reason, "no claims");

    let (a, sa) = f.junior.signed_claim("COLOR", "blue", 0.5);
    let (b, sb) = f.senior.signed_claim("COLOR", "green", 0.5);
    f.engine.submit_claim(&a, "Junior", &sa).await.unwrap();
    f.engine.submit_claim(&b, "Senior", &sb).await.unwrap();

    let contested = f.engine.resolve("COLOR").await.unwrap();
    assert_eq!(contested.status, ResolutionStatus::Contested);
    assert_eq!(contested.value, None);
    assert!(f.engine.list_trust_events(10, 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn override_wins_until_cleared() {
    let f = fixture();
    let (claim, sig) = f.senior.signed_claim("API_PORT", "9000", 0.9);
    f.engine.submit_claim(&claim, "Senior", &sig).await.unwrap();

    let set_sig = f.admin.sign_override_set("API_PORT", "8080", "ops decision");
    let record = f
        .engine
        .set_override("API_PORT", "8080", "ops decision", "Admin", &set_sig)
        .await
        .unwrap();
    assert_eq!(record.issued_by, "Admin");

    // Claims arriving after the override do not change the answer.
    let (late, late_sig) = f.junior.signed_claim("API_PORT", "7000", 1.0);
    f.engine.submit_claim(&late, "Junior", &late_sig).await.unwrap();
    for _ in 0..2 {
        let resolution = f.engine.resolve("API_PORT").await.unwrap();
        assert_eq!(resolution.status, ResolutionStatus::HumanOverride);
        assert_eq!(resolution.value.as_deref(), Some("8080"));
        assert_eq!(resolution.reason, "ops decision");
    }
    assert!(f.engine.list_trust_events(10, 0).await.unwrap().is_empty());

    let clear_sig = f.admin.sign_override_clear("API_PORT");
    assert!(f.engine.clear_override("API_PORT", "Admin", &clear_sig).await.unwrap());
    assert!(!f.engine.clear_override("API_PORT", "Admin", &clear_sig).await.unwrap());
    assert!(f.engine.check_override("API_PORT").await.unwrap().is_none());

    let after = f.engine.resolve("API_PORT").await.unwrap();
    assert_ne!(after.status, ResolutionStatus::HumanOverride);
}

#[tokio::test]
async fn overrides_require_admin_and_valid_signature() {
    let f = fixture();
    let sig = f.junior.sign_override_set("API_PORT", "1", "mine");
    let err = f
        .engine
        .set_override("API_PORT", "1", "mine", "Junior", &sig)
        .await
        .unwrap_err();
    assert!(is_identity_error(&err, |e| matches!(e, IdentityError::Unauthorized { .. })));

    let sig = f.admin.sign_override_set("API_PORT", "1", "reason");
    let err = f
        .engine
        .set_override("API_PORT", "2", "reason", "Admin", &sig)
        .await
        .unwrap_err();
    assert!(is_identity_error(&err, |e| matches!(e, IdentityError::InvalidSignature { .. })));
    assert!(f.engine.check_override("API_PORT").await.unwrap().is_none());
}

#[tokio::test]
async fn override_replacement_is_audited() {
    let f = fixture();
    for value in ["1", "2"] {
        let sig = f.admin.sign_override_set("E", value, "r");
        f.engine.set_override("E", value, "r", "Admin", &sig).await.unwrap();
    }
    let entries = f.engine.list_audit(10, 0).await.unwrap();
    let latest = &entries[0];
    assert_eq!(latest.event, AuditEvent::OverrideSet);
    assert_eq!(latest.details["previous"]["value"], "1");
    assert_eq!(latest.details["new"]["value"], "2");
    assert_eq!(latest.details["payload_digest"].as_str().unwrap().len(), 64);
}

#[tokio::test]
async fn audit_records_claims_and_results() {
    let f = fixture();
    let (claim, sig) = f.junior.signed_claim("E", "v", 0.5);
    f.engine.submit_claim(&claim, "Junior", &sig).await.unwrap();
    f.engine.resolve("E").await.unwrap();

    let events: Vec<AuditEvent> = f
        .engine
        .list_audit(10, 0)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.event)
        .collect();
    assert_eq!(events, vec![AuditEvent::ConsensusResult, AuditEvent::ClaimAdded]);
}

#[tokio::test]
async fn out_of_range_confidence_is_clamped_after_verification() {
    let f = fixture();
    let (claim, sig) = f.junior.signed_claim("E", "v", 3.5);
    let stored = f.engine.submit_claim(&claim, "Junior", &sig).await.unwrap();
    assert_eq!(stored.confidence, 1.0);
}

#[tokio::test]
async fn rate_limit_applies_when_enabled() {
    let f = fixture_with(|c| c.security.rate_limit_enabled = true);
    for i in 0..5 {
        let (claim, sig) = f.junior.signed_claim("E", &i.to_string(), 0.5);
        f.engine.submit_claim(&claim, "Junior", &sig).await.unwrap();
    }
    let (claim, sig) = f.junior.signed_claim("E", "6", 0.5);
    let err = f.engine.submit_claim(&claim, "Junior", &sig).await.unwrap_err();
    assert!(matches!(err, CreError::RateLimited { limit: 5, .. }));
    assert_eq!(f.engine.claims_for("E").await.unwrap().len(), 5);
}

#[tokio::test]
async fn bypass_mode_must_be_explicit() {
    let f = fixture_with(|c| c.security.signature_mode = SignatureMode::InsecureBypass);
    let (claim, _) = f.junior.signed_claim("E", "v", 0.5);
    f.engine.submit_claim(&claim, "Junior", "garbage").await.unwrap();
    // Identity checks still apply in bypass mode.
    assert!(f.engine.submit_claim(&claim, "Ghost", "garbage").await.is_err());
}

#[tokio::test]
async fn trust_writer_and_timeline() {
    let f = fixture();
    let agent = AgentId::from("Worker");
    f.engine.reward(&agent, 1.0, "manual").await.unwrap();
    f.engine.penalize(&agent, 0.5, "manual").await.unwrap();
    assert_eq!(f.engine.decay().await.unwrap(), 0);

    let timeline = f.engine.trust_timeline(&agent).await.unwrap();
    assert_eq!(timeline.len(), 2);
    assert!((timeline[0].trust - 0.15).abs() < 1e-9);
    assert!((timeline[1].trust - 0.125).abs() < 1e-9);

    let all = f.engine.get_all_trust().await.unwrap();
    assert_eq!(all.len(), 1);
    let newest = f.engine.list_trust_events(1, 0).await.unwrap();
    assert!(newest[0].change < 0.0);
}
