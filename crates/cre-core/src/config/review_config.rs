use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ERROR_WEIGHTS, DEFAULT_MIN_REVIEWS, DEFAULT_MIN_REVIEW_CONFIDENCE,
    UNKNOWN_ERROR_WEIGHT,
};

/// Error-review quorum and severity table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Reviews required per (agent, error type) group. Default: 2.
    pub min_reviews: usize,
    /// Average reviewer confidence required. Default: 0.6.
    pub min_confidence: f64,
    /// Severity weight per error type.
    pub severity_weights: BTreeMap<String, f64>,
    /// Weight for error types missing from the table. Default: 0.5.
    pub unknown_weight: f64,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            min_reviews: DEFAULT_MIN_REVIEWS,
            min_confidence: DEFAULT_MIN_REVIEW_CONFIDENCE,
            severity_weights: DEFAULT_ERROR_WEIGHTS
                .iter()
                .map(|(k, w)| (k.to_string(), *w))
                .collect(),
            unknown_weight: UNKNOWN_ERROR_WEIGHT,
        }
    }
}

impl ReviewConfig {
    /// Severity weight for an error type, falling back to `unknown_weight`.
    pub fn severity_weight(&self, error_type: &str) -> f64 {
        self.severity_weights
            .get(error_type)
            .copied()
            .unwrap_or(self.unknown_weight)
    }
}
