use super::assets_model::*;
use crate::Result;
use async_trait::async_trait;

/// Trait defining the contract for Asset repository operations.
///
/// Mutations taking an [`AssetValuationPatch`] must apply the field update and
/// the derived-state patch in one storage transaction.
#[async_trait]
pub trait AssetRepositoryTrait: Send + Sync {
    fn get_asset(&self, asset_id: &str) -> Result<Asset>;
    fn get_assets(&self) -> Result<Vec<Asset>>;
    async fn create_asset(&self, new_asset: NewAsset) -> Result<Asset>;
    async fn update_asset(
        &self,
        update: AssetUpdate,
        valuation: AssetValuationPatch,
    ) -> Result<Asset>;
    /// Deletes the asset and its whole event ledger atomically.
    async fn delete_asset(&self, asset_id: &str) -> Result<()>;
}

/// Trait defining the contract for Asset service operations.
#[async_trait]
pub trait AssetServiceTrait: Send + Sync {
    fn get_asset(&self, asset_id: &str) -> Result<Asset>;
    fn get_assets(&self) -> Result<Vec<Asset>>;
    async fn create_asset(&self, new_asset: NewAsset) -> Result<Asset>;
    async fn update_asset(&self, update: AssetUpdate) -> Result<Asset>;
    async fn delete_asset(&self, asset_id: &str) -> Result<()>;
}
