use chrono::{NaiveDate, Utc};
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use uuid::Uuid;

use super::snapshots_model::*;
use super::snapshots_traits::{SnapshotRepositoryTrait, SnapshotServiceTrait};
use crate::constants::DECIMAL_PRECISION;
use crate::errors::RuleViolation;
use crate::investors::OwnershipServiceTrait;
use crate::nav::NavServiceTrait;
use crate::Result;
use async_trait::async_trait;

/// Snapshot builder: combines the NAV aggregator and the ownership
/// calculator into one immutable point-in-time record with per-investor fee
/// allocation.
pub struct SnapshotService {
    nav_service: Arc<dyn NavServiceTrait>,
    ownership_service: Arc<dyn OwnershipServiceTrait>,
    snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
}

impl SnapshotService {
    pub fn new(
        nav_service: Arc<dyn NavServiceTrait>,
        ownership_service: Arc<dyn OwnershipServiceTrait>,
        snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
    ) -> Self {
        Self {
            nav_service,
            ownership_service,
            snapshot_repository,
        }
    }
}

#[async_trait]
impl SnapshotServiceTrait for SnapshotService {
    async fn create_snapshot(
        &self,
        snapshot_date: NaiveDate,
        performance_fee_rate: Option<Decimal>,
    ) -> Result<PeriodSnapshotWithInvestors> {
        if let Some(rate) = performance_fee_rate {
            if rate < Decimal::ZERO || rate > dec!(100) {
                return Err(RuleViolation::FeeRateOutOfRange(rate).into());
            }
        }

        let nav = self.nav_service.calculate_current_nav()?;
        let ownership = self.ownership_service.calculate_ownership()?;

        // A zero rate means "no fee configured", same as an absent one.
        let effective_rate = performance_fee_rate.filter(|rate| !rate.is_zero());
        // The fee is levied on investors in proportion to ownership. With no
        // capital in the fund there is no ownership to levy it on, so the
        // fee is zero rather than parked on an arbitrary investor.
        let total_capital: Decimal = ownership.iter().map(|row| row.capital_amount).sum();
        let total_fee = effective_rate.map(|rate| {
            if total_capital.is_zero() {
                Decimal::ZERO
            } else {
                (nav.nav * rate / dec!(100)).round_dp(DECIMAL_PRECISION)
            }
        });

        let now = Utc::now();
        let snapshot = PeriodSnapshot {
            id: Uuid::new_v4().to_string(),
            snapshot_date,
            total_asset_value: nav.total_asset_value,
            total_bank_balance: nav.total_bank_balance,
            total_liabilities: nav.total_liabilities,
            nav: nav.nav,
            performance_fee_rate: effective_rate,
            total_performance_fee: total_fee,
            created_at: now,
        };

        let mut investor_snapshots: Vec<InvestorSnapshot> = ownership
            .iter()
            .map(|row| InvestorSnapshot {
                id: Uuid::new_v4().to_string(),
                snapshot_id: snapshot.id.clone(),
                investor_id: row.investor_id.clone(),
                capital_amount: row.capital_amount,
                ownership_percent: row.ownership_percent,
                performance_fee: total_fee.map(|fee| {
                    (fee * row.ownership_percent / dec!(100)).round_dp(DECIMAL_PRECISION)
                }),
                created_at: now,
            })
            .collect();

        // Pro-rata rounding can leave the allocations a hair off the total;
        // park the residual on the largest allocation so they sum exactly.
        // Only meaningful when ownership percents sum to 100, which needs
        // capital in the fund.
        if let (Some(total), false) = (total_fee, total_capital.is_zero()) {
            let allocated: Decimal = investor_snapshots
                .iter()
                .filter_map(|row| row.performance_fee)
                .sum();
            let residual = total - allocated;
            if !residual.is_zero() {
                if let Some(largest) = investor_snapshots
                    .iter_mut()
                    .max_by(|a, b| a.capital_amount.cmp(&b.capital_amount))
                {
                    largest.performance_fee =
                        Some(largest.performance_fee.unwrap_or(Decimal::ZERO) + residual);
                }
            }
        }

        debug!(
            "Creating snapshot for {} (nav {}, {} investors, fee {:?})",
            snapshot_date,
            snapshot.nav,
            investor_snapshots.len(),
            total_fee
        );

        let persisted = self
            .snapshot_repository
            .create_snapshot(snapshot, investor_snapshots.clone())
            .await?;

        Ok(PeriodSnapshotWithInvestors {
            snapshot: persisted,
            investor_snapshots,
        })
    }

    fn get_snapshots(&self) -> Result<Vec<PeriodSnapshot>> {
        self.snapshot_repository.get_snapshots()
    }

    fn get_snapshot(&self, snapshot_id: &str) -> Result<PeriodSnapshotWithInvestors> {
        let snapshot = self.snapshot_repository.get_snapshot(snapshot_id)?;
        let investor_snapshots = self.snapshot_repository.get_investor_snapshots(snapshot_id)?;
        Ok(PeriodSnapshotWithInvestors {
            snapshot,
            investor_snapshots,
        })
    }

    async fn delete_snapshot(&self, snapshot_id: &str) -> Result<()> {
        self.snapshot_repository.delete_snapshot(snapshot_id).await
    }
}
