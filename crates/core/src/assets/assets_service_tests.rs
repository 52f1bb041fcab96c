//! Unit tests for asset orchestration, chiefly the replay-base updates.

use super::*;
use crate::errors::{Error, RuleViolation};
use crate::events::{AssetEvent, AssetEventRepositoryTrait, AssetEventType, NewAssetEvent};
use crate::utils::Patch;
use crate::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::{Arc, RwLock};

struct MockAssetRepository {
    assets: RwLock<Vec<Asset>>,
}

#[async_trait]
impl AssetRepositoryTrait for MockAssetRepository {
    fn get_asset(&self, asset_id: &str) -> Result<Asset> {
        self.assets
            .read()
            .unwrap()
            .iter()
            .find(|a| a.id == asset_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Asset {asset_id}")))
    }

    fn get_assets(&self) -> Result<Vec<Asset>> {
        Ok(self.assets.read().unwrap().clone())
    }

    async fn create_asset(&self, _new_asset: NewAsset) -> Result<Asset> {
        unimplemented!()
    }

    async fn update_asset(
        &self,
        update: AssetUpdate,
        valuation: AssetValuationPatch,
    ) -> Result<Asset> {
        let mut assets = self.assets.write().unwrap();
        let asset = assets
            .iter_mut()
            .find(|a| a.id == update.id)
            .ok_or_else(|| Error::not_found(format!("Asset {}", update.id)))?;
        update.apply_to(asset);
        valuation.apply_to(asset);
        Ok(asset.clone())
    }

    async fn delete_asset(&self, asset_id: &str) -> Result<()> {
        self.assets.write().unwrap().retain(|a| a.id != asset_id);
        Ok(())
    }
}

struct MockEventRepository {
    events: RwLock<Vec<AssetEvent>>,
}

#[async_trait]
impl AssetEventRepositoryTrait for MockEventRepository {
    fn get_event(&self, _event_id: &str) -> Result<AssetEvent> {
        unimplemented!()
    }

    fn get_events_for_asset(&self, asset_id: &str) -> Result<Vec<AssetEvent>> {
        let mut events: Vec<AssetEvent> = self
            .events
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.asset_id == asset_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.date);
        Ok(events)
    }

    async fn insert_event(
        &self,
        _event: AssetEvent,
        _valuation: AssetValuationPatch,
    ) -> Result<AssetEvent> {
        unimplemented!()
    }

    async fn update_event(
        &self,
        _event: AssetEvent,
        _valuation: AssetValuationPatch,
    ) -> Result<AssetEvent> {
        unimplemented!()
    }

    async fn delete_event(&self, _event_id: &str, _valuation: AssetValuationPatch) -> Result<()> {
        unimplemented!()
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn property_asset() -> Asset {
    let now = Utc::now();
    Asset {
        id: "asset-1".to_string(),
        name: "Warehouse".to_string(),
        kind: AssetKind::Property,
        status: AssetStatus::Active,
        currency: "USD".to_string(),
        current_value: dec!(500000),
        acquired_price: Some(dec!(500000)),
        acquired_date: date(2024, 6, 1),
        sale_price: None,
        sale_date: None,
        note: None,
        principal_amount: None,
        interest_rate: None,
        payment_period: None,
        maturity_date: None,
        loan_status: None,
        created_at: now,
        updated_at: now,
    }
}

fn capex_event(asset_id: &str, amount: Decimal, d: NaiveDate) -> AssetEvent {
    NewAssetEvent {
        asset_id: asset_id.to_string(),
        event_type: AssetEventType::Capex,
        amount: Some(amount),
        date: d,
        note: None,
        is_paid: None,
        payment_date: None,
        principal_amount: None,
        interest_amount: None,
        reference_period_start: None,
        reference_period_end: None,
    }
    .into_event()
}

fn setup(assets: Vec<Asset>, events: Vec<AssetEvent>) -> AssetService {
    AssetService::new(
        Arc::new(MockAssetRepository {
            assets: RwLock::new(assets),
        }),
        Arc::new(MockEventRepository {
            events: RwLock::new(events),
        }),
    )
}

#[tokio::test]
async fn acquired_date_cannot_move_past_the_earliest_event() {
    let service = setup(
        vec![property_asset()],
        vec![capex_event("asset-1", dec!(50000), date(2025, 1, 5))],
    );

    let update = AssetUpdate {
        id: "asset-1".to_string(),
        acquired_date: Some(date(2025, 2, 1)),
        ..Default::default()
    };
    let err = service.update_asset(update).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Rule(RuleViolation::EventDateOutOfOrder { date: d, min_date })
            if d == date(2025, 1, 5) && min_date == date(2025, 2, 1)
    ));
}

#[tokio::test]
async fn acquired_date_may_move_up_to_the_earliest_event() {
    let service = setup(
        vec![property_asset()],
        vec![capex_event("asset-1", dec!(50000), date(2025, 1, 5))],
    );

    let update = AssetUpdate {
        id: "asset-1".to_string(),
        acquired_date: Some(date(2025, 1, 5)),
        ..Default::default()
    };
    let updated = service.update_asset(update).await.unwrap();

    assert_eq!(updated.acquired_date, date(2025, 1, 5));
    assert_eq!(updated.current_value, dec!(550000));
}

#[tokio::test]
async fn acquired_price_update_recomputes_the_replayed_value() {
    let service = setup(
        vec![property_asset()],
        vec![capex_event("asset-1", dec!(50000), date(2025, 1, 5))],
    );

    let update = AssetUpdate {
        id: "asset-1".to_string(),
        acquired_price: Patch::Set(dec!(600000)),
        ..Default::default()
    };
    let updated = service.update_asset(update).await.unwrap();

    assert_eq!(updated.current_value, dec!(650000));
}
