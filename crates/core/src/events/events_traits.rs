use super::events_model::*;
use crate::assets::AssetValuationPatch;
use crate::Result;
use async_trait::async_trait;

/// Trait defining the contract for AssetEvent repository operations.
///
/// Every mutation takes the [`AssetValuationPatch`] computed from the new
/// ledger state; implementations must commit the event write and the asset
/// patch as one indivisible unit. A reader must never observe an event
/// without the corresponding value update, or vice versa.
#[async_trait]
pub trait AssetEventRepositoryTrait: Send + Sync {
    fn get_event(&self, event_id: &str) -> Result<AssetEvent>;
    /// Returns the asset's full ledger in replay order: ascending date,
    /// insertion order within a day.
    fn get_events_for_asset(&self, asset_id: &str) -> Result<Vec<AssetEvent>>;
    async fn insert_event(
        &self,
        event: AssetEvent,
        valuation: AssetValuationPatch,
    ) -> Result<AssetEvent>;
    async fn update_event(
        &self,
        event: AssetEvent,
        valuation: AssetValuationPatch,
    ) -> Result<AssetEvent>;
    async fn delete_event(&self, event_id: &str, valuation: AssetValuationPatch) -> Result<()>;
}

/// Trait defining the contract for the asset valuation engine.
#[async_trait]
pub trait ValuationServiceTrait: Send + Sync {
    async fn append_event(&self, new_event: NewAssetEvent) -> Result<AssetEvent>;
    async fn update_event(&self, update: AssetEventUpdate) -> Result<AssetEvent>;
    async fn delete_event(&self, event_id: &str) -> Result<()>;
    fn get_validation_info(&self, asset_id: &str) -> Result<EventValidationInfo>;
}
