use super::snapshots_model::*;
use crate::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Trait defining the contract for snapshot repository operations.
#[async_trait]
pub trait SnapshotRepositoryTrait: Send + Sync {
    fn get_snapshot(&self, snapshot_id: &str) -> Result<PeriodSnapshot>;
    fn get_snapshots(&self) -> Result<Vec<PeriodSnapshot>>;
    fn get_investor_snapshots(&self, snapshot_id: &str) -> Result<Vec<InvestorSnapshot>>;
    /// Persists the parent and every investor row in one transaction; a
    /// partially committed snapshot must never be observable.
    async fn create_snapshot(
        &self,
        snapshot: PeriodSnapshot,
        investor_snapshots: Vec<InvestorSnapshot>,
    ) -> Result<PeriodSnapshot>;
    /// Removes the snapshot and its investor rows atomically.
    async fn delete_snapshot(&self, snapshot_id: &str) -> Result<()>;
}

/// Trait defining the contract for the snapshot builder.
#[async_trait]
pub trait SnapshotServiceTrait: Send + Sync {
    async fn create_snapshot(
        &self,
        snapshot_date: NaiveDate,
        performance_fee_rate: Option<Decimal>,
    ) -> Result<PeriodSnapshotWithInvestors>;
    fn get_snapshots(&self) -> Result<Vec<PeriodSnapshot>>;
    fn get_snapshot(&self, snapshot_id: &str) -> Result<PeriodSnapshotWithInvestors>;
    /// Administrative correction only; snapshots are otherwise immutable.
    async fn delete_snapshot(&self, snapshot_id: &str) -> Result<()>;
}
