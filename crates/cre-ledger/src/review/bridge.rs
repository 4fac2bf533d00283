//! ErrorReviewBridge: turn accumulated error reviews into trust penalties.
//!
//! Reviews are grouped per entity by `(target_agent, error_type)`. A group
//! fires once it has at least `min_reviews` reviews with an average
//! confidence of at least `min_confidence`:
//!
//! `strength = avg(confidence) × severity_weight(error_type)`
//!
//! The target is penalized once with that strength, a penalty event is
//! written, and the group's reviews are marked consumed by it. Consumed
//! reviews never count again; groups below quorum stay pending.

use rusqlite::Connection;
use tracing::{debug, info, instrument};

use cre_core::config::ReviewConfig;
use cre_core::errors::CreResult;
use cre_core::models::{AgentId, AuditEvent, ErrorReview, PenaltyEvent};

use cre_storage::audit::AuditLogger;
use cre_storage::queries::review_ops::{self, NewPenaltyEvent};
use cre_storage::{format_ts, now};

use crate::trust::{clamp_confidence, TrustLedger};

pub const REASON_ERROR_REVIEW_PENALTY: &str = "error_review_penalty";

/// Applies review quorum rules and the severity table.
#[derive(Debug, Clone)]
pub struct ErrorReviewBridge {
    config: ReviewConfig,
}

impl ErrorReviewBridge {
    pub fn new(config: &ReviewConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    /// Append a review. No other side effect.
    #[instrument(skip(conn, review), fields(entity = %review.entity, target = %review.target_agent))]
    pub fn record(conn: &Connection, review: &ErrorReview) -> CreResult<i64> {
        let review = ErrorReview {
            confidence: clamp_confidence(review.confidence),
            ..review.clone()
        };
        let id = review_ops::insert_review(conn, &review)?;
        debug!(review_id = id, error_type = %review.error_type, "error review recorded");
        Ok(id)
    }

    /// Penalize every qualifying pending group for `entity`.
    #[instrument(skip(self, conn, ledger))]
    pub fn apply_penalties(
        &self,
        conn: &Connection,
        ledger: &TrustLedger,
        entity: &str,
        min_reviews: usize,
        min_confidence: f64,
    ) -> CreResult<Vec<PenaltyEvent>> {
        let mut applied = Vec::new();

        for group in review_ops::pending_groups(conn, entity)? {
            if group.review_count < min_reviews || group.avg_confidence < min_confidence {
                debug!(
                    target_agent = %group.target_agent,
                    error_type = %group.error_type,
                    count = group.review_count,
                    avg_confidence = group.avg_confidence,
                    "review group below threshold"
                );
                continue;
            }

            let weight = self.config.severity_weight(&group.error_type);
            let strength = group.avg_confidence * weight;
            let agent = AgentId(group.target_agent.clone());
            ledger.penalize(conn, &agent, strength, REASON_ERROR_REVIEW_PENALTY)?;

            let timestamp = now();
            let id = review_ops::insert_penalty_event(
                conn,
                &NewPenaltyEvent {
                    agent_id: agent.as_str(),
                    entity,
                    error_type: &group.error_type,
                    weight,
                    avg_confidence: group.avg_confidence,
                    penalty_strength: strength,
                    review_count: group.review_count,
                    reason: REASON_ERROR_REVIEW_PENALTY,
                    timestamp: &format_ts(&timestamp),
                },
            )?;
            review_ops::mark_consumed(conn, entity, &group, id)?;

            applied.push(PenaltyEvent {
                id,
                agent_id: agent,
                entity: entity.to_string(),
                error_type: group.error_type.clone(),
                weight,
                avg_confidence: group.avg_confidence,
                penalty_strength: strength,
                review_count: group.review_count,
                reason: REASON_ERROR_REVIEW_PENALTY.to_string(),
                timestamp,
            });
        }

        if !applied.is_empty() {
            AuditLogger::log(
                conn,
                AuditEvent::PenaltiesApplied,
                entity,
                "system",
                serde_json::json!({
                    "min_reviews": min_reviews,
                    "min_confidence": min_confidence,
                    "penalties": applied,
                }),
            )?;
            info!(entity, count = applied.len(), "error-review penalties applied");
        }
        Ok(applied)
    }

    /// Sweep every entity with pending reviews using the configured thresholds.
    pub fn apply_pending(
        &self,
        conn: &Connection,
        ledger: &TrustLedger,
    ) -> CreResult<Vec<PenaltyEvent>> {
        let mut applied = Vec::new();
        for entity in review_ops::entities_with_pending_reviews(conn)? {
            applied.extend(self.apply_penalties(
                conn,
                ledger,
                &entity,
                self.config.min_reviews,
                self.config.min_confidence,
            )?);
        }
        Ok(applied)
    }
}
