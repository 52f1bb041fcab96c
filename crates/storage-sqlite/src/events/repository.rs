use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use fundbook_core::assets::AssetValuationPatch;
use fundbook_core::events::{AssetEvent, AssetEventRepositoryTrait};
use fundbook_core::{Error, Result};

use super::model::AssetEventDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::parsing::fmt_date_opt;
use crate::schema::{asset_events, assets};
use async_trait::async_trait;

/// Repository for the append-mostly asset event ledger.
///
/// Every mutation also writes the asset's derived valuation state, in the
/// same transaction, so the stored `current_value` can never disagree with
/// the stored ledger.
pub struct AssetEventRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AssetEventRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn apply_valuation(conn: &mut SqliteConnection, patch: &AssetValuationPatch) -> Result<()> {
    let affected = diesel::update(assets::table.find(&patch.asset_id))
        .set((
            assets::current_value.eq(patch.current_value.to_string()),
            assets::status.eq(patch.status.as_db_str().to_string()),
            assets::sale_price.eq(patch.sale_price.map(|d| d.to_string())),
            assets::sale_date.eq(fmt_date_opt(patch.sale_date)),
            assets::loan_status.eq(patch.loan_status.map(|s| s.as_db_str().to_string())),
            assets::updated_at.eq(Utc::now().to_rfc3339()),
        ))
        .execute(conn)
        .map_err(StorageError::from)?;
    if affected == 0 {
        return Err(Error::not_found(format!("Asset {}", patch.asset_id)));
    }
    Ok(())
}

#[async_trait]
impl AssetEventRepositoryTrait for AssetEventRepository {
    fn get_event(&self, event_id: &str) -> Result<AssetEvent> {
        let mut conn = get_connection(&self.pool)?;
        let event_db = asset_events::table
            .select(AssetEventDB::as_select())
            .find(event_id)
            .first::<AssetEventDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::not_found(format!("Asset event {event_id}")))?;
        Ok(AssetEvent::from(event_db))
    }

    fn get_events_for_asset(&self, asset_id: &str) -> Result<Vec<AssetEvent>> {
        let mut conn = get_connection(&self.pool)?;
        // Replay order: date, then insertion order for same-day entries.
        let events_db = asset_events::table
            .filter(asset_events::asset_id.eq(asset_id))
            .select(AssetEventDB::as_select())
            .order((asset_events::date.asc(), asset_events::created_at.asc()))
            .load::<AssetEventDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(events_db.into_iter().map(AssetEvent::from).collect())
    }

    async fn insert_event(
        &self,
        event: AssetEvent,
        valuation: AssetValuationPatch,
    ) -> Result<AssetEvent> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<AssetEvent> {
                let event_db: AssetEventDB = event.into();
                let inserted = diesel::insert_into(asset_events::table)
                    .values(&event_db)
                    .get_result::<AssetEventDB>(conn)
                    .map_err(StorageError::from)?;
                apply_valuation(conn, &valuation)?;
                Ok(AssetEvent::from(inserted))
            })
            .await
    }

    async fn update_event(
        &self,
        event: AssetEvent,
        valuation: AssetValuationPatch,
    ) -> Result<AssetEvent> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<AssetEvent> {
                let event_id = event.id.clone();
                let event_db: AssetEventDB = event.into();
                let updated = diesel::update(asset_events::table.find(event_id))
                    .set(&event_db)
                    .get_result::<AssetEventDB>(conn)
                    .map_err(StorageError::from)?;
                apply_valuation(conn, &valuation)?;
                Ok(AssetEvent::from(updated))
            })
            .await
    }

    async fn delete_event(&self, event_id: &str, valuation: AssetValuationPatch) -> Result<()> {
        let event_id = event_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let affected = diesel::delete(asset_events::table.find(&event_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::not_found(format!("Asset event {event_id}")));
                }
                apply_valuation(conn, &valuation)
            })
            .await
    }
}
