//! ResolutionEngine: implements the engine traits and orchestrates identity,
//! claims, consensus, overrides, trust, and error reviews over one store.
//!
//! Every mutation runs in one writer transaction (`StorageEngine::write`), so
//! a trust change and its event, or an override and its audit row, commit
//! together. The writer lock is the global critical section that keeps
//! decay from interleaving with targeted reward/penalty calls.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{instrument, warn};

use cre_core::config::CreConfig;
use cre_core::errors::{CreResult, IdentityError};
use cre_core::models::{
    Action, AgentId, AuditEntry, Claim, ClaimRequest, ErrorReview, OverrideRecord, PenaltyEvent,
    Resolution, TrustEvent, TrustTimelinePoint,
};
use cre_core::traits::{IClaimSubmitter, IResolver, ITrustReader, ITrustWriter};

use cre_identity::canonical;
use cre_identity::{ClaimRateLimiter, IdentityRegistry, SignatureVerifier};
use cre_storage::queries::{audit_ops, resolution_ops, review_ops};
use cre_storage::StorageEngine;

use crate::claims::ClaimStore;
use crate::governance::GovernanceOverride;
use crate::resolution::resolve_entity;
use crate::review::ErrorReviewBridge;
use crate::trust::TrustLedger;

/// What one maintenance pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaintenanceReport {
    /// Agents whose trust moved during decay.
    pub decayed: usize,
    /// Penalty events written by the review sweep.
    pub penalties: usize,
}

/// The claim resolution engine.
pub struct ResolutionEngine {
    storage: Arc<StorageEngine>,
    identities: IdentityRegistry,
    verifier: SignatureVerifier,
    limiter: ClaimRateLimiter,
    ledger: TrustLedger,
    reviews: ErrorReviewBridge,
    config: CreConfig,
}

impl ResolutionEngine {
    /// Build an engine over an existing store. The identity registry is
    /// loaded from `config.identities`.
    pub fn new(storage: Arc<StorageEngine>, config: CreConfig) -> CreResult<Self> {
        config.validate()?;
        let identities = IdentityRegistry::from_config(&config.identities)?;
        let verifier = SignatureVerifier::new(config.security.signature_mode);
        if verifier.mode() == cre_core::config::SignatureMode::InsecureBypass {
            warn!("engine started with signature verification bypassed");
        }
        Ok(Self {
            storage,
            identities,
            verifier,
            limiter: ClaimRateLimiter::from_config(&config.security),
            ledger: TrustLedger::new(&config.trust),
            reviews: ErrorReviewBridge::new(&config.review),
            config,
        })
    }

    /// Open the database named in `config.storage`.
    pub fn open(config: CreConfig) -> CreResult<Self> {
        let storage = Arc::new(StorageEngine::from_config(&config.storage)?);
        Self::new(storage, config)
    }

    /// In-memory engine (for testing).
    pub fn open_in_memory(config: CreConfig) -> CreResult<Self> {
        Self::new(Arc::new(StorageEngine::open_in_memory()?), config)
    }

    pub fn storage(&self) -> &Arc<StorageEngine> {
        &self.storage
    }

    pub fn identities(&self) -> &IdentityRegistry {
        &self.identities
    }

    pub fn config(&self) -> &CreConfig {
        &self.config
    }

    pub fn ledger(&self) -> &TrustLedger {
        &self.ledger
    }

    /// One maintenance pass: decay, then the pending-penalty sweep. Each step
    /// is its own transaction, so a failed sweep keeps the decay.
    pub async fn run_maintenance(&self) -> CreResult<MaintenanceReport> {
        let decayed = self
            .storage
            .write(|conn| self.ledger.decay(conn))
            .await?;
        let penalties = self.apply_pending_penalties().await?.len();
        Ok(MaintenanceReport { decayed, penalties })
    }

    /// Consensus feedback for one claimant, outside a resolution.
    pub async fn update_trust(
        &self,
        agent: &AgentId,
        correct: bool,
        confidence: f64,
    ) -> CreResult<TrustEvent> {
        self.storage
            .write(|conn| self.ledger.update(conn, agent, correct, confidence))
            .await
    }

    /// Append an error review.
    pub async fn record_error_review(&self, review: &ErrorReview) -> CreResult<i64> {
        self.storage
            .write(|conn| ErrorReviewBridge::record(conn, review))
            .await
    }

    /// Apply pending review penalties for an entity with the configured
    /// quorum and confidence thresholds.
    pub async fn apply_error_penalties(&self, entity: &str) -> CreResult<Vec<PenaltyEvent>> {
        let review = &self.config.review;
        self.apply_error_penalties_with(entity, review.min_reviews, review.min_confidence)
            .await
    }

    /// Apply pending review penalties with explicit thresholds.
    pub async fn apply_error_penalties_with(
        &self,
        entity: &str,
        min_reviews: usize,
        min_confidence: f64,
    ) -> CreResult<Vec<PenaltyEvent>> {
        self.storage
            .write(|conn| {
                self.reviews
                    .apply_penalties(conn, &self.ledger, entity, min_reviews, min_confidence)
            })
            .await
    }

    /// Apply pending penalties across every entity.
    pub async fn apply_pending_penalties(&self) -> CreResult<Vec<PenaltyEvent>> {
        self.storage
            .write(|conn| self.reviews.apply_pending(conn, &self.ledger))
            .await
    }

    pub async fn claims_for(&self, entity: &str) -> CreResult<Vec<Claim>> {
        self.storage
            .read(|conn| ClaimStore::claims_for(conn, entity))
            .await
    }

    /// Most recent resolutions for an entity, newest first.
    pub async fn resolution_history(&self, entity: &str, limit: usize) -> CreResult<Vec<Resolution>> {
        self.storage
            .read(|conn| resolution_ops::resolutions_for_entity(conn, entity, limit))
            .await
    }

    pub async fn check_override(&self, entity: &str) -> CreResult<Option<OverrideRecord>> {
        self.storage
            .read(|conn| GovernanceOverride::check(conn, entity))
            .await
    }

    /// Penalty events, newest first.
    pub async fn list_penalty_events(
        &self,
        limit: usize,
        offset: usize,
    ) -> CreResult<Vec<PenaltyEvent>> {
        self.storage
            .read(|conn| review_ops::list_penalty_events(conn, limit, offset))
            .await
    }

    /// Audit entries, newest first.
    pub async fn list_audit(&self, limit: usize, offset: usize) -> CreResult<Vec<AuditEntry>> {
        self.storage
            .read(|conn| audit_ops::list_audit(conn, limit, offset))
            .await
    }
}

impl IClaimSubmitter for ResolutionEngine {
    #[instrument(skip(self, request, signature), fields(entity = %request.entity))]
    async fn submit_claim(
        &self,
        request: &ClaimRequest,
        identity_id: &str,
        signature: &str,
    ) -> CreResult<Claim> {
        let identity = self.identities.authorize(identity_id, Action::Claim)?;
        if request.agent.as_str() != identity.id {
            return Err(IdentityError::Unauthorized {
                identity: identity.id,
                reason: format!("cannot claim on behalf of '{}'", request.agent),
            }
            .into());
        }

        let payload = canonical::claim_payload(
            request.agent.as_str(),
            &request.entity,
            &request.value,
            request.confidence,
        )?;
        self.verifier
            .verify(&identity.public_key, &payload, signature)?;
        self.limiter.check(&identity)?;

        self.storage
            .write(|conn| {
                ClaimStore::submit(
                    conn,
                    &self.ledger,
                    &request.agent,
                    &request.entity,
                    &request.value,
                    request.confidence,
                )
            })
            .await
    }
}

impl IResolver for ResolutionEngine {
    async fn resolve(&self, entity: &str) -> CreResult<Resolution> {
        self.storage
            .write(|conn| resolve_entity(conn, &self.ledger, entity))
            .await
    }

    #[instrument(skip(self, reason, signature))]
    async fn set_override(
        &self,
        entity: &str,
        value: &str,
        reason: &str,
        identity_id: &str,
        signature: &str,
    ) -> CreResult<OverrideRecord> {
        let identity = self.identities.authorize(identity_id, Action::Override)?;
        let payload = canonical::override_set_payload(entity, value, reason)?;
        self.verifier
            .verify(&identity.public_key, &payload, signature)?;
        let digest = canonical::payload_digest(&payload);

        self.storage
            .write(|conn| GovernanceOverride::set(conn, entity, value, reason, &identity.id, &digest))
            .await
    }

    #[instrument(skip(self, signature))]
    async fn clear_override(
        &self,
        entity: &str,
        identity_id: &str,
        signature: &str,
    ) -> CreResult<bool> {
        let identity = self.identities.authorize(identity_id, Action::Override)?;
        let payload = canonical::override_clear_payload(entity)?;
        self.verifier
            .verify(&identity.public_key, &payload, signature)?;
        let digest = canonical::payload_digest(&payload);

        self.storage
            .write(|conn| GovernanceOverride::clear(conn, entity, &identity.id, &digest))
            .await
    }
}

impl ITrustReader for ResolutionEngine {
    async fn get_trust(&self, agent: &AgentId) -> CreResult<f64> {
        self.storage.read(|conn| self.ledger.get(conn, agent)).await
    }

    async fn get_all_trust(&self) -> CreResult<BTreeMap<AgentId, f64>> {
        self.storage.read(|conn| self.ledger.get_all(conn)).await
    }

    async fn list_trust_events(&self, limit: usize, offset: usize) -> CreResult<Vec<TrustEvent>> {
        self.storage
            .read(|conn| TrustLedger::list_events(conn, limit, offset))
            .await
    }

    async fn trust_timeline(&self, agent: &AgentId) -> CreResult<Vec<TrustTimelinePoint>> {
        // Current value and events must come from the same snapshot.
        self.storage
            .write(|conn| self.ledger.timeline(conn, agent))
            .await
    }
}

impl ITrustWriter for ResolutionEngine {
    async fn reward(&self, agent: &AgentId, confidence: f64, reason: &str) -> CreResult<TrustEvent> {
        self.storage
            .write(|conn| self.ledger.reward(conn, agent, confidence, reason))
            .await
    }

    async fn penalize(
        &self,
        agent: &AgentId,
        confidence: f64,
        reason: &str,
    ) -> CreResult<TrustEvent> {
        self.storage
            .write(|conn| self.ledger.penalize(conn, agent, confidence, reason))
            .await
    }

    async fn decay(&self) -> CreResult<usize> {
        self.storage.write(|conn| self.ledger.decay(conn)).await
    }
}
