use log::debug;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::events_model::*;
use super::events_traits::{AssetEventRepositoryTrait, ValuationServiceTrait};
use super::ledger;
use crate::assets::{Asset, AssetRepositoryTrait};
use crate::errors::{Error, RuleViolation, ValidationError};
use crate::Result;
use async_trait::async_trait;

/// The asset valuation engine: validates incoming events, replays the ledger,
/// and persists the event plus the asset's derived state atomically.
///
/// Append is not a hand-maintained incremental step: every mutation replays
/// the full ledger through [`ledger::derive_state`], so the persisted
/// `current_value` always equals the replay of what is stored.
pub struct ValuationService {
    asset_repository: Arc<dyn AssetRepositoryTrait>,
    event_repository: Arc<dyn AssetEventRepositoryTrait>,
    // Serializes ledger mutations: append reads the latest event date and the
    // running value before writing, which must not interleave with another
    // writer. Reads stay lock-free.
    write_lock: Mutex<()>,
}

impl ValuationService {
    pub fn new(
        asset_repository: Arc<dyn AssetRepositoryTrait>,
        event_repository: Arc<dyn AssetEventRepositoryTrait>,
    ) -> Self {
        Self {
            asset_repository,
            event_repository,
            write_lock: Mutex::new(()),
        }
    }

    fn check_loan_only_event(&self, asset: &Asset, event_type: AssetEventType) -> Result<()> {
        if event_type.is_interest_event() && !asset.kind.is_loan() {
            return Err(ValidationError::LoanEventOnNonLoanAsset {
                event_type: event_type.as_db_str().to_string(),
                asset_id: asset.id.clone(),
                kind: asset.kind.as_db_str().to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl ValuationServiceTrait for ValuationService {
    async fn append_event(&self, new_event: NewAssetEvent) -> Result<AssetEvent> {
        let _guard = self.write_lock.lock().await;

        let asset = self.asset_repository.get_asset(&new_event.asset_id)?;
        if asset.is_sold() {
            return Err(RuleViolation::AssetSold {
                asset_id: asset.id,
            }
            .into());
        }
        self.check_loan_only_event(&asset, new_event.event_type)?;

        let mut events = self.event_repository.get_events_for_asset(&asset.id)?;
        let min_date = events
            .last()
            .map(|event| event.date)
            .unwrap_or(asset.acquired_date);
        if new_event.date < min_date {
            return Err(RuleViolation::EventDateOutOfOrder {
                date: new_event.date,
                min_date,
            }
            .into());
        }

        let event = new_event.into_event();
        events.push(event.clone());
        let outcome = ledger::derive_state(asset.kind, asset.base_value(), &events);
        debug!(
            "Appending {} to asset {}: value {} -> {}",
            event.event_type.as_db_str(),
            asset.id,
            asset.current_value,
            outcome.current_value
        );

        self.event_repository
            .insert_event(event, outcome.into_patch(asset.id))
            .await
    }

    async fn update_event(&self, update: AssetEventUpdate) -> Result<AssetEvent> {
        let _guard = self.write_lock.lock().await;

        let existing = self.event_repository.get_event(&update.id)?;
        let asset = self.asset_repository.get_asset(&existing.asset_id)?;

        let mut edited = existing;
        update.apply_to(&mut edited);
        self.check_loan_only_event(&asset, edited.event_type)?;
        if edited.date < asset.acquired_date {
            return Err(RuleViolation::EventDateOutOfOrder {
                date: edited.date,
                min_date: asset.acquired_date,
            }
            .into());
        }

        // Editing a historical event invalidates every later running value,
        // so rebuild the ledger and replay it whole.
        let mut events = self.event_repository.get_events_for_asset(&asset.id)?;
        let slot = events
            .iter_mut()
            .find(|event| event.id == edited.id)
            .ok_or_else(|| Error::not_found(format!("Asset event {}", edited.id)))?;
        *slot = edited.clone();
        ledger::sort_events(&mut events);

        let outcome = ledger::derive_state(asset.kind, asset.base_value(), &events);
        self.event_repository
            .update_event(edited, outcome.into_patch(asset.id))
            .await
    }

    async fn delete_event(&self, event_id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let existing = self.event_repository.get_event(event_id)?;
        let asset = self.asset_repository.get_asset(&existing.asset_id)?;

        let mut events = self.event_repository.get_events_for_asset(&asset.id)?;
        events.retain(|event| event.id != event_id);

        // Deleting the only SALE event reopens the asset: derive_state over
        // the remaining ledger resets status and clears sale price/date.
        let outcome = ledger::derive_state(asset.kind, asset.base_value(), &events);
        debug!(
            "Deleting event {} from asset {}: value {} -> {}",
            event_id, asset.id, asset.current_value, outcome.current_value
        );

        self.event_repository
            .delete_event(event_id, outcome.into_patch(asset.id))
            .await
    }

    fn get_validation_info(&self, asset_id: &str) -> Result<EventValidationInfo> {
        let asset = self.asset_repository.get_asset(asset_id)?;
        let events = self.event_repository.get_events_for_asset(asset_id)?;
        let last = events.last();

        Ok(EventValidationInfo {
            can_add_events: !asset.is_sold(),
            min_date: last.map(|event| event.date).unwrap_or(asset.acquired_date),
            last_event_date: last.map(|event| event.date),
            last_event_type: last.map(|event| event.event_type),
            is_sold: asset.is_sold(),
        })
    }
}
