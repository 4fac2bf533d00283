//! Trust ledger: per-agent trust, the learning rule, decay, and timelines.

pub mod decay;
pub mod ledger;
pub mod timeline;

pub use ledger::TrustLedger;

/// Clamp a caller-supplied confidence into `[0, 1]`; non-finite becomes 0.
pub fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_finite() {
        confidence.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
