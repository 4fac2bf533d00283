//! Absolute trust over time, rebuilt from the event log.
//!
//! Start from the current value, subtract every change newest-first to reach
//! the value before the first event, then add the changes back oldest-first.

use rusqlite::Connection;

use cre_core::errors::CreResult;
use cre_core::models::{AgentId, TrustEvent, TrustTimelinePoint};

use cre_storage::queries::trust_ops;

use super::TrustLedger;

impl TrustLedger {
    /// One point per event: the trust value right after that event.
    pub fn timeline(&self, conn: &Connection, agent: &AgentId) -> CreResult<Vec<TrustTimelinePoint>> {
        let current = self.get(conn, agent)?;
        let events = trust_ops::events_for_agent(conn, agent.as_str())?;
        Ok(replay(current, &events))
    }
}

/// Rebuild absolute values from `current` and the agent's events, oldest first.
pub fn replay(current: f64, events: &[TrustEvent]) -> Vec<TrustTimelinePoint> {
    let start = initial_value(current, events);
    let mut trust = start;
    events
        .iter()
        .map(|event| {
            trust += event.change;
            TrustTimelinePoint {
                timestamp: event.timestamp,
                trust,
            }
        })
        .collect()
}

/// Trust before the first event.
pub fn initial_value(current: f64, events: &[TrustEvent]) -> f64 {
    events.iter().rev().fold(current, |trust, event| trust - event.change)
}
