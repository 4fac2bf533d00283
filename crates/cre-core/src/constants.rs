/// Engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Trust assigned to an agent that has never been seen.
pub const DEFAULT_TRUST: f64 = 0.1;

/// Lower bound for any stored trust value.
pub const TRUST_FLOOR: f64 = 0.05;

/// Upper bound for any stored trust value.
pub const TRUST_CEILING: f64 = 1.0;

/// Nominal reward for a fully confident correct claim.
pub const BASE_REWARD: f64 = 0.05;

/// Nominal penalty for a fully confident incorrect claim.
pub const BASE_PENALTY: f64 = 0.05;

/// The top value must score at least this multiple of the runner-up to win.
/// Fixed, not configurable.
pub const CONSENSUS_MARGIN: f64 = 1.2;

/// Seconds between scheduled maintenance passes (decay + penalty sweep).
pub const DEFAULT_DECAY_INTERVAL_SECS: u64 = 300;

/// Minimum number of reviews before an error group is penalized.
pub const DEFAULT_MIN_REVIEWS: usize = 2;

/// Minimum average reviewer confidence before an error group is penalized.
pub const DEFAULT_MIN_REVIEW_CONFIDENCE: f64 = 0.6;

/// Severity weight for error types missing from the table.
pub const UNKNOWN_ERROR_WEIGHT: f64 = 0.5;

/// Default severity table: (error_type, weight).
pub const DEFAULT_ERROR_WEIGHTS: &[(&str, f64)] = &[
    ("FACT_ERROR", 1.0),
    ("HALLUCINATION", 0.9),
    ("LOGIC_ERROR", 0.8),
    ("CODE_ERROR", 0.7),
    ("FORMAT_ERROR", 0.3),
    ("SPELLING_ERROR", 0.1),
];

/// Sliding window used by the claim rate limiter.
pub const RATE_LIMIT_WINDOW_SECS: i64 = 60;

/// Default page size for event listings.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Length in bytes of an Ed25519 public key.
pub const PUBLIC_KEY_LEN: usize = 32;
