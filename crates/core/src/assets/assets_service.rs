use log::debug;
use std::sync::Arc;

use super::assets_model::*;
use super::assets_traits::{AssetRepositoryTrait, AssetServiceTrait};
use crate::errors::RuleViolation;
use crate::events::{ledger, AssetEventRepositoryTrait};
use crate::Result;
use async_trait::async_trait;

/// Service for managing assets.
///
/// Updates that touch the replay base (acquisition price/date) recompute the
/// derived valuation from the full ledger, so `current_value` never drifts
/// from its source of truth.
pub struct AssetService {
    asset_repository: Arc<dyn AssetRepositoryTrait>,
    event_repository: Arc<dyn AssetEventRepositoryTrait>,
}

impl AssetService {
    pub fn new(
        asset_repository: Arc<dyn AssetRepositoryTrait>,
        event_repository: Arc<dyn AssetEventRepositoryTrait>,
    ) -> Self {
        Self {
            asset_repository,
            event_repository,
        }
    }
}

#[async_trait]
impl AssetServiceTrait for AssetService {
    fn get_asset(&self, asset_id: &str) -> Result<Asset> {
        self.asset_repository.get_asset(asset_id)
    }

    fn get_assets(&self) -> Result<Vec<Asset>> {
        self.asset_repository.get_assets()
    }

    async fn create_asset(&self, new_asset: NewAsset) -> Result<Asset> {
        new_asset.validate()?;
        debug!("Creating asset '{}'", new_asset.name);
        self.asset_repository.create_asset(new_asset).await
    }

    async fn update_asset(&self, update: AssetUpdate) -> Result<Asset> {
        let asset = self.asset_repository.get_asset(&update.id)?;
        update.validate(asset.kind)?;

        // Recompute the derived state against the updated replay base.
        let mut updated = asset.clone();
        update.clone().apply_to(&mut updated);
        let events = self.event_repository.get_events_for_asset(&asset.id)?;
        // The acquisition date bounds the ledger: it cannot move past the
        // earliest recorded event.
        if let Some(earliest) = events.iter().map(|event| event.date).min() {
            if earliest < updated.acquired_date {
                return Err(RuleViolation::EventDateOutOfOrder {
                    date: earliest,
                    min_date: updated.acquired_date,
                }
                .into());
            }
        }
        let outcome = ledger::derive_state(updated.kind, updated.base_value(), &events);

        self.asset_repository
            .update_asset(update, outcome.into_patch(asset.id))
            .await
    }

    async fn delete_asset(&self, asset_id: &str) -> Result<()> {
        // Existence check so callers get NOT_FOUND rather than a silent no-op.
        let asset = self.asset_repository.get_asset(asset_id)?;
        debug!("Deleting asset {} ('{}')", asset.id, asset.name);
        self.asset_repository.delete_asset(asset_id).await
    }
}
