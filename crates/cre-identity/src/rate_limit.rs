//! Sliding-window claim quota per identity.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

use cre_core::config::SecurityConfig;
use cre_core::constants::RATE_LIMIT_WINDOW_SECS;
use cre_core::errors::{CreError, CreResult};
use cre_core::models::{Identity, Role};

/// Per-identity claim counter over the last [`RATE_LIMIT_WINDOW_SECS`].
#[derive(Debug)]
pub struct ClaimRateLimiter {
    enabled: bool,
    agent_limit: u32,
    admin_limit: u32,
    window: Duration,
    hits: DashMap<String, VecDeque<DateTime<Utc>>>,
}

impl ClaimRateLimiter {
    pub fn from_config(config: &SecurityConfig) -> Self {
        Self {
            enabled: config.rate_limit_enabled,
            agent_limit: config.agent_claims_per_minute,
            admin_limit: config.admin_claims_per_minute,
            window: Duration::seconds(RATE_LIMIT_WINDOW_SECS),
            hits: DashMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn limit_for(&self, role: Role) -> u32 {
        match role {
            Role::Agent => self.agent_limit,
            Role::HumanAdmin => self.admin_limit,
        }
    }

    /// Count one claim for `identity` now, or fail if the quota is spent.
    pub fn check(&self, identity: &Identity) -> CreResult<()> {
        self.check_at(identity, Utc::now())
    }

    /// Same as [`check`](Self::check) with an explicit clock.
    pub fn check_at(&self, identity: &Identity, now: DateTime<Utc>) -> CreResult<()> {
        if !self.enabled {
            return Ok(());
        }
        let limit = self.limit_for(identity.role);
        let mut window = self.hits.entry(identity.id.clone()).or_default();
        while window
            .front()
            .is_some_and(|oldest| now - *oldest >= self.window)
        {
            window.pop_front();
        }
        if window.len() >= limit as usize {
            tracing::warn!(identity = %identity.id, limit, "claim rate limit exceeded");
            return Err(CreError::RateLimited {
                identity: identity.id.clone(),
                limit,
            });
        }
        window.push_back(now);
        Ok(())
    }
}
