//! TrustLedger: current trust per agent and the reward/penalty rule.
//!
//! `reward`:   `new = min(old + BASE_REWARD × c, CEILING)`
//! `penalize`: `new = max(old − BASE_PENALTY × c, FLOOR)`
//!
//! with `c = clamp(confidence, 0, 1)`. Every mutation writes the new value and
//! a [`TrustEvent`] carrying the realized delta `new − old`, so at the bounds
//! the logged change is smaller than the nominal one. Callers run these inside
//! one writer transaction; the value and its event commit together.

use std::collections::BTreeMap;

use rusqlite::Connection;
use tracing::{debug, instrument};

use cre_core::config::TrustConfig;
use cre_core::errors::CreResult;
use cre_core::models::{AgentId, TrustEvent};

use cre_storage::queries::trust_ops;
use cre_storage::{format_ts, now};

use super::clamp_confidence;

pub const REASON_CONSENSUS_CORRECT: &str = "consensus_correct";
pub const REASON_CONSENSUS_INCORRECT: &str = "consensus_incorrect";

/// Applies the trust learning rule against the store.
#[derive(Debug, Clone)]
pub struct TrustLedger {
    config: TrustConfig,
}

impl TrustLedger {
    pub fn new(config: &TrustConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &TrustConfig {
        &self.config
    }

    /// Current trust, or `default_trust` for an agent with no row.
    /// Never inserts a row.
    pub fn get(&self, conn: &Connection, agent: &AgentId) -> CreResult<f64> {
        Ok(trust_ops::get_trust(conn, agent.as_str())?
            .map(|record| record.trust)
            .unwrap_or(self.config.default_trust))
    }

    /// Every agent with a stored trust value.
    pub fn get_all(&self, conn: &Connection) -> CreResult<BTreeMap<AgentId, f64>> {
        Ok(trust_ops::list_trust(conn)?
            .into_iter()
            .map(|record| (record.agent_id, record.trust))
            .collect())
    }

    #[instrument(skip(self, conn))]
    pub fn reward(
        &self,
        conn: &Connection,
        agent: &AgentId,
        confidence: f64,
        reason: &str,
    ) -> CreResult<TrustEvent> {
        let c = clamp_confidence(confidence);
        self.apply(conn, agent, self.config.base_reward * c, c, reason)
    }

    #[instrument(skip(self, conn))]
    pub fn penalize(
        &self,
        conn: &Connection,
        agent: &AgentId,
        confidence: f64,
        reason: &str,
    ) -> CreResult<TrustEvent> {
        let c = clamp_confidence(confidence);
        self.apply(conn, agent, -self.config.base_penalty * c, c, reason)
    }

    /// Consensus feedback: reward a correct claimant, penalize the rest.
    pub fn update(
        &self,
        conn: &Connection,
        agent: &AgentId,
        correct: bool,
        confidence: f64,
    ) -> CreResult<TrustEvent> {
        if correct {
            self.reward(conn, agent, confidence, REASON_CONSENSUS_CORRECT)
        } else {
            self.penalize(conn, agent, confidence, REASON_CONSENSUS_INCORRECT)
        }
    }

    /// Set trust to `target` (clamped) and log the realized change.
    pub(crate) fn apply_absolute(
        &self,
        conn: &Connection,
        agent: &AgentId,
        old: f64,
        target: f64,
        confidence: f64,
        reason: &str,
    ) -> CreResult<TrustEvent> {
        let new = self.config.clamp(target);
        let change = new - old;
        let timestamp = now();
        let ts = format_ts(&timestamp);

        trust_ops::upsert_trust(conn, agent.as_str(), new, &ts)?;
        let id = trust_ops::insert_trust_event(conn, agent.as_str(), change, reason, confidence, &ts)?;

        debug!(agent = %agent, old, new, change, reason, "trust updated");
        Ok(TrustEvent {
            id,
            agent_id: agent.clone(),
            change,
            reason: reason.to_string(),
            confidence,
            timestamp,
        })
    }

    fn apply(
        &self,
        conn: &Connection,
        agent: &AgentId,
        nominal_delta: f64,
        confidence: f64,
        reason: &str,
    ) -> CreResult<TrustEvent> {
        let old = self.get(conn, agent)?;
        self.apply_absolute(conn, agent, old, old + nominal_delta, confidence, reason)
    }

    /// Trust events newest-first.
    pub fn list_events(
        conn: &Connection,
        limit: usize,
        offset: usize,
    ) -> CreResult<Vec<TrustEvent>> {
        trust_ops::list_trust_events(conn, limit, offset)
    }
}
