//! Global decay pass: pull every stored trust toward `default_trust`.
//!
//! `new = old + (default − old) × decay_rate`, clamped. A rate of 0 leaves
//! every value and the event log untouched.

use rusqlite::Connection;
use tracing::{debug, instrument};

use cre_core::errors::CreResult;

use cre_storage::queries::trust_ops;

use super::TrustLedger;

pub const REASON_DECAY: &str = "decay";

impl TrustLedger {
    /// Run one decay pass. Returns the number of agents whose trust moved.
    #[instrument(skip(self, conn))]
    pub fn decay(&self, conn: &Connection) -> CreResult<usize> {
        let rate = self.config().decay_rate;
        if rate <= 0.0 {
            debug!("decay rate is zero, skipping pass");
            return Ok(0);
        }
        let baseline = self.config().default_trust;

        let mut moved = 0;
        for record in trust_ops::list_trust(conn)? {
            let target = record.trust + (baseline - record.trust) * rate;
            if self.config().clamp(target) == record.trust {
                continue;
            }
            self.apply_absolute(conn, &record.agent_id, record.trust, target, rate, REASON_DECAY)?;
            moved += 1;
        }
        debug!(moved, rate, "decay pass complete");
        Ok(moved)
    }
}
