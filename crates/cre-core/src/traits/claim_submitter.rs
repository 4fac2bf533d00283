use crate::errors::CreResult;
use crate::models::{Claim, ClaimRequest};

/// Authenticated claim ingestion.
#[allow(async_fn_in_trait)]
pub trait IClaimSubmitter: Send + Sync {
    /// Authenticate `identity_id` for the claim action, verify `signature` (base64)
    /// over the canonical claim payload, and append the claim.
    async fn submit_claim(
        &self,
        request: &ClaimRequest,
        identity_id: &str,
        signature: &str,
    ) -> CreResult<Claim>;
}
