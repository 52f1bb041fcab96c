use super::*;
use crate::errors::{Error, RuleViolation};
use crate::investors::{InvestorOwnership, OwnershipServiceTrait};
use crate::nav::{NavServiceTrait, NavSummary};
use crate::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::{Arc, RwLock};

struct MockNavService {
    summary: NavSummary,
}

impl NavServiceTrait for MockNavService {
    fn calculate_current_nav(&self) -> Result<NavSummary> {
        Ok(self.summary.clone())
    }
}

struct MockOwnershipService {
    rows: Vec<InvestorOwnership>,
}

impl OwnershipServiceTrait for MockOwnershipService {
    fn calculate_ownership(&self) -> Result<Vec<InvestorOwnership>> {
        Ok(self.rows.clone())
    }
}

/// Records what the service asked to persist.
#[derive(Default)]
struct MockSnapshotRepository {
    persisted: RwLock<Vec<(PeriodSnapshot, Vec<InvestorSnapshot>)>>,
}

#[async_trait]
impl SnapshotRepositoryTrait for MockSnapshotRepository {
    fn get_snapshot(&self, snapshot_id: &str) -> Result<PeriodSnapshot> {
        self.persisted
            .read()
            .unwrap()
            .iter()
            .map(|(snapshot, _)| snapshot)
            .find(|snapshot| snapshot.id == snapshot_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Snapshot {snapshot_id}")))
    }

    fn get_snapshots(&self) -> Result<Vec<PeriodSnapshot>> {
        Ok(self
            .persisted
            .read()
            .unwrap()
            .iter()
            .map(|(snapshot, _)| snapshot.clone())
            .collect())
    }

    fn get_investor_snapshots(&self, snapshot_id: &str) -> Result<Vec<InvestorSnapshot>> {
        Ok(self
            .persisted
            .read()
            .unwrap()
            .iter()
            .filter(|(snapshot, _)| snapshot.id == snapshot_id)
            .flat_map(|(_, rows)| rows.clone())
            .collect())
    }

    async fn create_snapshot(
        &self,
        snapshot: PeriodSnapshot,
        investor_snapshots: Vec<InvestorSnapshot>,
    ) -> Result<PeriodSnapshot> {
        self.persisted
            .write()
            .unwrap()
            .push((snapshot.clone(), investor_snapshots));
        Ok(snapshot)
    }

    async fn delete_snapshot(&self, snapshot_id: &str) -> Result<()> {
        self.persisted
            .write()
            .unwrap()
            .retain(|(snapshot, _)| snapshot.id != snapshot_id);
        Ok(())
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn nav_summary(nav: Decimal) -> NavSummary {
    NavSummary {
        total_asset_value: nav,
        total_bank_balance: Decimal::ZERO,
        total_liabilities: Decimal::ZERO,
        nav,
        asset_breakdown: vec![],
        bank_breakdown: vec![],
        liability_breakdown: vec![],
    }
}

fn owner(id: &str, capital: Decimal, percent: Decimal) -> InvestorOwnership {
    InvestorOwnership {
        investor_id: id.to_string(),
        investor_name: id.to_string(),
        total_deposits: capital,
        total_withdrawals: Decimal::ZERO,
        capital_amount: capital,
        ownership_percent: percent,
    }
}

fn setup(
    nav: Decimal,
    rows: Vec<InvestorOwnership>,
) -> (Arc<MockSnapshotRepository>, SnapshotService) {
    let repository = Arc::new(MockSnapshotRepository::default());
    let service = SnapshotService::new(
        Arc::new(MockNavService {
            summary: nav_summary(nav),
        }),
        Arc::new(MockOwnershipService { rows }),
        repository.clone(),
    );
    (repository, service)
}

#[tokio::test]
async fn snapshot_captures_the_nav_summary() {
    let (_repo, service) = setup(dec!(550000), vec![owner("alice", dec!(100000), dec!(100))]);

    let result = service
        .create_snapshot(date(2025, 12, 31), Some(dec!(20)))
        .await
        .unwrap();

    assert_eq!(result.snapshot.snapshot_date, date(2025, 12, 31));
    assert_eq!(result.snapshot.nav, dec!(550000));
    assert_eq!(result.snapshot.performance_fee_rate, Some(dec!(20)));
    assert_eq!(result.snapshot.total_performance_fee, Some(dec!(110000)));
}

#[tokio::test]
async fn omitted_rate_leaves_every_fee_field_empty() {
    let (_repo, service) = setup(dec!(550000), vec![owner("alice", dec!(100000), dec!(100))]);

    let result = service
        .create_snapshot(date(2025, 12, 31), None)
        .await
        .unwrap();

    assert_eq!(result.snapshot.performance_fee_rate, None);
    assert_eq!(result.snapshot.total_performance_fee, None);
    assert_eq!(result.investor_snapshots[0].performance_fee, None);
}

#[tokio::test]
async fn zero_rate_is_treated_as_no_fee() {
    let (_repo, service) = setup(dec!(550000), vec![owner("alice", dec!(100000), dec!(100))]);

    let result = service
        .create_snapshot(date(2025, 12, 31), Some(Decimal::ZERO))
        .await
        .unwrap();

    assert_eq!(result.snapshot.performance_fee_rate, None);
    assert_eq!(result.snapshot.total_performance_fee, None);
}

#[tokio::test]
async fn rate_outside_zero_to_one_hundred_is_rejected() {
    let (repo, service) = setup(dec!(550000), vec![owner("alice", dec!(100000), dec!(100))]);

    for rate in [dec!(-1), dec!(100.01)] {
        let err = service
            .create_snapshot(date(2025, 12, 31), Some(rate))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Rule(RuleViolation::FeeRateOutOfRange(r)) if r == rate
        ));
    }
    assert!(repo.persisted.read().unwrap().is_empty());
}

#[tokio::test]
async fn fee_is_allocated_pro_rata() {
    let (_repo, service) = setup(
        dec!(1000000),
        vec![
            owner("alice", dec!(750000), dec!(75)),
            owner("bob", dec!(250000), dec!(25)),
        ],
    );

    let result = service
        .create_snapshot(date(2025, 12, 31), Some(dec!(10)))
        .await
        .unwrap();

    assert_eq!(result.snapshot.total_performance_fee, Some(dec!(100000)));
    let alice = &result.investor_snapshots[0];
    let bob = &result.investor_snapshots[1];
    assert_eq!(alice.performance_fee, Some(dec!(75000)));
    assert_eq!(bob.performance_fee, Some(dec!(25000)));
}

#[tokio::test]
async fn fee_allocations_sum_exactly_to_the_total() {
    // Thirds force rounding; the residual lands on the largest capital.
    let (_repo, service) = setup(
        dec!(100),
        vec![
            owner("a", dec!(100.02), dec!(33.339999)),
            owner("b", dec!(100), dec!(33.333333)),
            owner("c", dec!(99.99), dec!(33.326668)),
        ],
    );

    let result = service
        .create_snapshot(date(2025, 12, 31), Some(dec!(20)))
        .await
        .unwrap();

    let total = result.snapshot.total_performance_fee.unwrap();
    let allocated: Decimal = result
        .investor_snapshots
        .iter()
        .map(|row| row.performance_fee.unwrap())
        .sum();
    assert_eq!(allocated, total);
}

#[tokio::test]
async fn every_investor_gets_a_row_even_with_zero_capital() {
    let (_repo, service) = setup(
        dec!(100000),
        vec![
            owner("alice", dec!(100000), dec!(100)),
            owner("carol", Decimal::ZERO, Decimal::ZERO),
        ],
    );

    let result = service
        .create_snapshot(date(2025, 12, 31), Some(dec!(20)))
        .await
        .unwrap();

    assert_eq!(result.investor_snapshots.len(), 2);
    let carol = result
        .investor_snapshots
        .iter()
        .find(|row| row.investor_id == "carol")
        .unwrap();
    assert_eq!(carol.ownership_percent, Decimal::ZERO);
    assert_eq!(carol.performance_fee, Some(Decimal::ZERO));
}

#[tokio::test]
async fn fund_without_capital_accrues_no_fee() {
    let (_repo, service) = setup(
        dec!(1000000),
        vec![
            owner("alice", Decimal::ZERO, Decimal::ZERO),
            owner("bob", Decimal::ZERO, Decimal::ZERO),
        ],
    );

    let result = service
        .create_snapshot(date(2025, 12, 31), Some(dec!(20)))
        .await
        .unwrap();

    // No ownership to levy the fee on: the total is zero and no investor
    // picks up a residual.
    assert_eq!(result.snapshot.performance_fee_rate, Some(dec!(20)));
    assert_eq!(result.snapshot.total_performance_fee, Some(Decimal::ZERO));
    assert_eq!(result.investor_snapshots.len(), 2);
    for row in &result.investor_snapshots {
        assert_eq!(row.ownership_percent, Decimal::ZERO);
        assert_eq!(row.performance_fee, Some(Decimal::ZERO));
    }
}

#[tokio::test]
async fn repository_receives_parent_and_investor_rows_together() {
    let (repo, service) = setup(
        dec!(100000),
        vec![
            owner("alice", dec!(60000), dec!(60)),
            owner("bob", dec!(40000), dec!(40)),
        ],
    );

    let result = service
        .create_snapshot(date(2025, 12, 31), None)
        .await
        .unwrap();

    let persisted = repo.persisted.read().unwrap();
    assert_eq!(persisted.len(), 1);
    let (snapshot, rows) = &persisted[0];
    assert_eq!(snapshot.id, result.snapshot.id);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.snapshot_id == snapshot.id));
}

#[tokio::test]
async fn get_snapshot_joins_the_investor_rows() {
    let (_repo, service) = setup(dec!(100000), vec![owner("alice", dec!(100000), dec!(100))]);

    let created = service
        .create_snapshot(date(2025, 12, 31), None)
        .await
        .unwrap();
    let fetched = service.get_snapshot(&created.snapshot.id).unwrap();

    assert_eq!(fetched.snapshot, created.snapshot);
    assert_eq!(fetched.investor_snapshots.len(), 1);

    service.delete_snapshot(&created.snapshot.id).await.unwrap();
    assert!(service.get_snapshot(&created.snapshot.id).is_err());
}
