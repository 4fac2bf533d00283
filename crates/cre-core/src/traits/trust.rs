use std::collections::BTreeMap;

use crate::errors::CreResult;
use crate::models::{AgentId, TrustEvent, TrustTimelinePoint};

/// Read side of the trust ledger.
#[allow(async_fn_in_trait)]
pub trait ITrustReader: Send + Sync {
    /// Current trust, or the default trust for an unseen agent.
    async fn get_trust(&self, agent: &AgentId) -> CreResult<f64>;

    async fn get_all_trust(&self) -> CreResult<BTreeMap<AgentId, f64>>;

    /// Trust events, newest first.
    async fn list_trust_events(&self, limit: usize, offset: usize) -> CreResult<Vec<TrustEvent>>;

    /// Absolute trust after each event for `agent`, oldest first.
    async fn trust_timeline(&self, agent: &AgentId) -> CreResult<Vec<TrustTimelinePoint>>;
}

/// Write side of the trust ledger. Every call appends trust events.
#[allow(async_fn_in_trait)]
pub trait ITrustWriter: Send + Sync {
    async fn reward(&self, agent: &AgentId, confidence: f64, reason: &str)
        -> CreResult<TrustEvent>;

    async fn penalize(
        &self,
        agent: &AgentId,
        confidence: f64,
        reason: &str,
    ) -> CreResult<TrustEvent>;

    /// Global decay pass. Returns the number of agents whose trust moved.
    async fn decay(&self) -> CreResult<usize>;
}
