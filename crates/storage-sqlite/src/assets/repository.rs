use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use fundbook_core::assets::{
    Asset, AssetRepositoryTrait, AssetUpdate, AssetValuationPatch, NewAsset,
};
use fundbook_core::{Error, Result};

use super::model::AssetDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{asset_events, assets};
use async_trait::async_trait;

/// Repository for managing asset rows.
pub struct AssetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AssetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_asset(conn: &mut SqliteConnection, asset_id: &str) -> Result<Asset> {
    let asset_db = assets::table
        .select(AssetDB::as_select())
        .find(asset_id)
        .first::<AssetDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| Error::not_found(format!("Asset {asset_id}")))?;
    Ok(Asset::from(asset_db))
}

#[async_trait]
impl AssetRepositoryTrait for AssetRepository {
    fn get_asset(&self, asset_id: &str) -> Result<Asset> {
        let mut conn = get_connection(&self.pool)?;
        load_asset(&mut conn, asset_id)
    }

    fn get_assets(&self) -> Result<Vec<Asset>> {
        let mut conn = get_connection(&self.pool)?;
        let assets_db = assets::table
            .select(AssetDB::as_select())
            .order(assets::acquired_date.asc())
            .load::<AssetDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(assets_db.into_iter().map(Asset::from).collect())
    }

    async fn create_asset(&self, new_asset: NewAsset) -> Result<Asset> {
        let asset_db: AssetDB = new_asset.into();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Asset> {
                let inserted = diesel::insert_into(assets::table)
                    .values(&asset_db)
                    .get_result::<AssetDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Asset::from(inserted))
            })
            .await
    }

    async fn update_asset(
        &self,
        update: AssetUpdate,
        valuation: AssetValuationPatch,
    ) -> Result<Asset> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Asset> {
                // Field update and derived-state patch land in one transaction.
                let mut asset = load_asset(conn, &update.id)?;
                let asset_id = asset.id.clone();
                update.apply_to(&mut asset);
                valuation.apply_to(&mut asset);
                asset.updated_at = Utc::now();

                let asset_db: AssetDB = asset.into();
                let updated = diesel::update(assets::table.find(asset_id))
                    .set(&asset_db)
                    .get_result::<AssetDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Asset::from(updated))
            })
            .await
    }

    async fn delete_asset(&self, asset_id: &str) -> Result<()> {
        let asset_id = asset_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                // The ledger goes with the asset.
                diesel::delete(asset_events::table.filter(asset_events::asset_id.eq(&asset_id)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                diesel::delete(assets::table.find(&asset_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
