use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use fundbook_core::snapshots::{InvestorSnapshot, PeriodSnapshot, SnapshotRepositoryTrait};
use fundbook_core::{Error, Result};

use super::model::{InvestorSnapshotDB, PeriodSnapshotDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{investor_snapshots, period_snapshots};
use async_trait::async_trait;

/// Repository for immutable period snapshots.
///
/// A snapshot and its investor rows are written and removed in one
/// transaction; a parent without its rows is never observable.
pub struct SnapshotRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SnapshotRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl SnapshotRepositoryTrait for SnapshotRepository {
    fn get_snapshot(&self, snapshot_id: &str) -> Result<PeriodSnapshot> {
        let mut conn = get_connection(&self.pool)?;
        let snapshot_db = period_snapshots::table
            .select(PeriodSnapshotDB::as_select())
            .find(snapshot_id)
            .first::<PeriodSnapshotDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::not_found(format!("Snapshot {snapshot_id}")))?;
        Ok(PeriodSnapshot::from(snapshot_db))
    }

    fn get_snapshots(&self) -> Result<Vec<PeriodSnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        let snapshots_db = period_snapshots::table
            .select(PeriodSnapshotDB::as_select())
            .order(period_snapshots::snapshot_date.desc())
            .load::<PeriodSnapshotDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(snapshots_db.into_iter().map(PeriodSnapshot::from).collect())
    }

    fn get_investor_snapshots(&self, snapshot_id: &str) -> Result<Vec<InvestorSnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        let rows_db = investor_snapshots::table
            .filter(investor_snapshots::snapshot_id.eq(snapshot_id))
            .select(InvestorSnapshotDB::as_select())
            .load::<InvestorSnapshotDB>(&mut conn)
            .map_err(StorageError::from)?;
        // Capital is stored as text, so sort after decoding; SQL would
        // compare the strings lexicographically.
        let mut rows: Vec<InvestorSnapshot> =
            rows_db.into_iter().map(InvestorSnapshot::from).collect();
        rows.sort_by(|a, b| b.capital_amount.cmp(&a.capital_amount));
        Ok(rows)
    }

    async fn create_snapshot(
        &self,
        snapshot: PeriodSnapshot,
        investor_rows: Vec<InvestorSnapshot>,
    ) -> Result<PeriodSnapshot> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<PeriodSnapshot> {
                    let snapshot_db: PeriodSnapshotDB = snapshot.into();
                    let inserted = diesel::insert_into(period_snapshots::table)
                        .values(&snapshot_db)
                        .get_result::<PeriodSnapshotDB>(conn)
                        .map_err(StorageError::from)?;

                    let rows_db: Vec<InvestorSnapshotDB> = investor_rows
                        .into_iter()
                        .map(InvestorSnapshotDB::from)
                        .collect();
                    diesel::insert_into(investor_snapshots::table)
                        .values(&rows_db)
                        .execute(conn)
                        .map_err(StorageError::from)?;

                    Ok(PeriodSnapshot::from(inserted))
                },
            )
            .await
    }

    async fn delete_snapshot(&self, snapshot_id: &str) -> Result<()> {
        let snapshot_id = snapshot_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::delete(
                    investor_snapshots::table
                        .filter(investor_snapshots::snapshot_id.eq(&snapshot_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                let affected = diesel::delete(period_snapshots::table.find(&snapshot_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::not_found(format!("Snapshot {snapshot_id}")));
                }
                Ok(())
            })
            .await
    }
}
