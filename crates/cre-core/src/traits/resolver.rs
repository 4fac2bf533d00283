use crate::errors::CreResult;
use crate::models::{OverrideRecord, Resolution};

/// Entity resolution and the human overrides that pre-empt it.
#[allow(async_fn_in_trait)]
pub trait IResolver: Send + Sync {
    /// Resolve an entity. Appends a resolution snapshot on every call.
    async fn resolve(&self, entity: &str) -> CreResult<Resolution>;

    /// Install or replace the override for `entity`. HUMAN_ADMIN only.
    async fn set_override(
        &self,
        entity: &str,
        value: &str,
        reason: &str,
        identity_id: &str,
        signature: &str,
    ) -> CreResult<OverrideRecord>;

    /// Remove the override for `entity`. Returns `false` if none existed.
    async fn clear_override(
        &self,
        entity: &str,
        identity_id: &str,
        signature: &str,
    ) -> CreResult<bool>;
}
