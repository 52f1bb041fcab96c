//! Property-based integration tests for ownership math and fee allocation.
//!
//! These tests verify that the exact-sum invariants hold across randomly
//! generated investor populations, using the `proptest` crate.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use fundbook_core::investors::{
    CashflowRepositoryTrait, CashflowType, CashflowUpdate, Investor, InvestorCashflow,
    InvestorRepositoryTrait, InvestorUpdate, NewCashflow, NewInvestor, OwnershipService,
    OwnershipServiceTrait,
};
use fundbook_core::nav::{NavServiceTrait, NavSummary};
use fundbook_core::snapshots::{
    InvestorSnapshot, PeriodSnapshot, SnapshotRepositoryTrait, SnapshotService,
    SnapshotServiceTrait,
};
use fundbook_core::{Error, Result};

// =============================================================================
// In-memory fixtures
// =============================================================================

struct FixedInvestors(Vec<Investor>);

#[async_trait]
impl InvestorRepositoryTrait for FixedInvestors {
    fn get_investor(&self, investor_id: &str) -> Result<Investor> {
        self.0
            .iter()
            .find(|i| i.id == investor_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Investor {investor_id}")))
    }

    fn get_investors(&self) -> Result<Vec<Investor>> {
        Ok(self.0.clone())
    }

    async fn create_investor(&self, _new_investor: NewInvestor) -> Result<Investor> {
        unimplemented!()
    }

    async fn update_investor(&self, _update: InvestorUpdate) -> Result<Investor> {
        unimplemented!()
    }

    async fn delete_investor(&self, _investor_id: &str) -> Result<()> {
        unimplemented!()
    }
}

struct FixedCashflows(Vec<InvestorCashflow>);

#[async_trait]
impl CashflowRepositoryTrait for FixedCashflows {
    fn get_cashflow(&self, cashflow_id: &str) -> Result<InvestorCashflow> {
        self.0
            .iter()
            .find(|c| c.id == cashflow_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Cashflow {cashflow_id}")))
    }

    fn get_cashflows(&self) -> Result<Vec<InvestorCashflow>> {
        Ok(self.0.clone())
    }

    fn get_cashflows_for_investor(&self, investor_id: &str) -> Result<Vec<InvestorCashflow>> {
        Ok(self
            .0
            .iter()
            .filter(|c| c.investor_id == investor_id)
            .cloned()
            .collect())
    }

    async fn create_cashflow(&self, _new_cashflow: NewCashflow) -> Result<InvestorCashflow> {
        unimplemented!()
    }

    async fn update_cashflow(&self, _update: CashflowUpdate) -> Result<InvestorCashflow> {
        unimplemented!()
    }

    async fn delete_cashflow(&self, _cashflow_id: &str) -> Result<()> {
        unimplemented!()
    }
}

struct FixedNav(NavSummary);

impl NavServiceTrait for FixedNav {
    fn calculate_current_nav(&self) -> Result<NavSummary> {
        Ok(self.0.clone())
    }
}

struct DiscardingSnapshots;

#[async_trait]
impl SnapshotRepositoryTrait for DiscardingSnapshots {
    fn get_snapshot(&self, snapshot_id: &str) -> Result<PeriodSnapshot> {
        Err(Error::not_found(format!("Snapshot {snapshot_id}")))
    }

    fn get_snapshots(&self) -> Result<Vec<PeriodSnapshot>> {
        Ok(vec![])
    }

    fn get_investor_snapshots(&self, _snapshot_id: &str) -> Result<Vec<InvestorSnapshot>> {
        Ok(vec![])
    }

    async fn create_snapshot(
        &self,
        snapshot: PeriodSnapshot,
        _investor_snapshots: Vec<InvestorSnapshot>,
    ) -> Result<PeriodSnapshot> {
        Ok(snapshot)
    }

    async fn delete_snapshot(&self, _snapshot_id: &str) -> Result<()> {
        Ok(())
    }
}

fn population(flows: &[(u32, u32)]) -> (Vec<Investor>, Vec<InvestorCashflow>) {
    let now = Utc::now();
    let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    let mut investors = Vec::new();
    let mut cashflows = Vec::new();
    for (index, (deposit, withdrawal)) in flows.iter().enumerate() {
        let id = format!("inv-{index}");
        investors.push(Investor {
            id: id.clone(),
            name: format!("Investor {index}"),
            email: None,
            created_at: now,
            updated_at: now,
        });
        cashflows.push(InvestorCashflow {
            id: format!("cf-d-{index}"),
            investor_id: id.clone(),
            flow_type: CashflowType::Deposit,
            amount: Decimal::from(*deposit),
            date,
            note: None,
            created_at: now,
            updated_at: now,
        });
        if *withdrawal > 0 {
            cashflows.push(InvestorCashflow {
                id: format!("cf-w-{index}"),
                investor_id: id,
                flow_type: CashflowType::Withdrawal,
                amount: Decimal::from(*withdrawal),
                date,
                note: None,
                created_at: now,
                updated_at: now,
            });
        }
    }
    (investors, cashflows)
}

fn ownership_service(flows: &[(u32, u32)]) -> OwnershipService {
    let (investors, cashflows) = population(flows);
    OwnershipService::new(
        Arc::new(FixedInvestors(investors)),
        Arc::new(FixedCashflows(cashflows)),
    )
}

/// Deposits at least as large as withdrawals, so total capital stays
/// non-negative the way the write path guarantees in practice.
fn arb_flows() -> impl Strategy<Value = Vec<(u32, u32)>> {
    proptest::collection::vec(
        (1u32..10_000_000).prop_flat_map(|d| (Just(d), 0..=d)),
        1..=25,
    )
}

// =============================================================================
// Property tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Ownership percentages sum to exactly 100 whenever any capital exists,
    /// regardless of how rounding falls out.
    #[test]
    fn prop_ownership_percents_sum_to_one_hundred(flows in arb_flows()) {
        let rows = ownership_service(&flows).calculate_ownership().unwrap();
        let total_capital: Decimal = rows.iter().map(|r| r.capital_amount).sum();
        let percent_sum: Decimal = rows.iter().map(|r| r.ownership_percent).sum();

        if total_capital.is_zero() {
            prop_assert!(rows.iter().all(|r| r.ownership_percent.is_zero()));
        } else {
            prop_assert_eq!(percent_sum, dec!(100));
        }
    }

    /// Capital is always deposits minus withdrawals, and never negative under
    /// the generator's constraint.
    #[test]
    fn prop_capital_is_deposits_minus_withdrawals(flows in arb_flows()) {
        let rows = ownership_service(&flows).calculate_ownership().unwrap();
        prop_assert_eq!(rows.len(), flows.len());
        for (row, (deposit, withdrawal)) in rows.iter().zip(&flows) {
            prop_assert_eq!(row.total_deposits, Decimal::from(*deposit));
            prop_assert_eq!(row.total_withdrawals, Decimal::from(*withdrawal));
            prop_assert_eq!(
                row.capital_amount,
                Decimal::from(*deposit) - Decimal::from(*withdrawal)
            );
            prop_assert!(row.capital_amount >= Decimal::ZERO);
        }
    }

    /// Per-investor fee allocations always sum to exactly the snapshot's
    /// total fee, whatever the population looks like.
    #[test]
    fn prop_fee_allocations_sum_to_total(
        flows in arb_flows(),
        nav in 1u32..100_000_000,
        rate in 1u32..=100,
    ) {
        let (investors, cashflows) = population(&flows);
        let ownership = OwnershipService::new(
            Arc::new(FixedInvestors(investors)),
            Arc::new(FixedCashflows(cashflows)),
        );
        let nav_value = Decimal::from(nav);
        let service = SnapshotService::new(
            Arc::new(FixedNav(NavSummary {
                total_asset_value: nav_value,
                total_bank_balance: Decimal::ZERO,
                total_liabilities: Decimal::ZERO,
                nav: nav_value,
                asset_breakdown: vec![],
                bank_breakdown: vec![],
                liability_breakdown: vec![],
            })),
            Arc::new(ownership),
            Arc::new(DiscardingSnapshots),
        );

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let result = runtime
            .block_on(service.create_snapshot(
                NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
                Some(Decimal::from(rate)),
            ))
            .unwrap();

        let total = result.snapshot.total_performance_fee.unwrap();
        let allocated: Decimal = result
            .investor_snapshots
            .iter()
            .map(|row| row.performance_fee.unwrap())
            .sum();
        prop_assert_eq!(allocated, total);
        prop_assert_eq!(result.investor_snapshots.len(), flows.len());
    }
}
