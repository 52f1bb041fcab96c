use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::nav_model::*;
use super::nav_traits::NavServiceTrait;
use crate::assets::AssetRepositoryTrait;
use crate::banking::{latest_per_account, BankBalanceRepositoryTrait, LiabilityRepositoryTrait};
use crate::Result;

/// NAV aggregator: sums active-asset values, latest-per-account bank
/// balances, and liabilities.
///
/// Sold assets leave the NAV base the moment they are sold; their realized
/// proceeds are expected to show up in bank balance reports.
pub struct NavService {
    asset_repository: Arc<dyn AssetRepositoryTrait>,
    bank_balance_repository: Arc<dyn BankBalanceRepositoryTrait>,
    liability_repository: Arc<dyn LiabilityRepositoryTrait>,
}

impl NavService {
    pub fn new(
        asset_repository: Arc<dyn AssetRepositoryTrait>,
        bank_balance_repository: Arc<dyn BankBalanceRepositoryTrait>,
        liability_repository: Arc<dyn LiabilityRepositoryTrait>,
    ) -> Self {
        Self {
            asset_repository,
            bank_balance_repository,
            liability_repository,
        }
    }
}

impl NavServiceTrait for NavService {
    fn calculate_current_nav(&self) -> Result<NavSummary> {
        // Assets: active only, grouped by kind.
        let mut total_asset_value = Decimal::ZERO;
        let mut by_kind: BTreeMap<&'static str, AssetKindBreakdown> = BTreeMap::new();
        for asset in self.asset_repository.get_assets()? {
            if asset.is_sold() {
                continue;
            }
            total_asset_value += asset.current_value;
            let entry = by_kind
                .entry(asset.kind.as_db_str())
                .or_insert(AssetKindBreakdown {
                    kind: asset.kind,
                    total_value: Decimal::ZERO,
                    asset_count: 0,
                });
            entry.total_value += asset.current_value;
            entry.asset_count += 1;
        }

        // Bank: one row per account (the latest), grouped by currency.
        let latest = latest_per_account(self.bank_balance_repository.get_balances()?);
        let mut total_bank_balance = Decimal::ZERO;
        let mut by_currency: BTreeMap<String, CurrencyBreakdown> = BTreeMap::new();
        for row in latest {
            total_bank_balance += row.amount;
            let entry = by_currency
                .entry(row.currency.clone())
                .or_insert(CurrencyBreakdown {
                    currency: row.currency.clone(),
                    total_amount: Decimal::ZERO,
                    account_count: 0,
                });
            entry.total_amount += row.amount;
            entry.account_count += 1;
        }

        // Liabilities.
        let liabilities = self.liability_repository.get_liabilities()?;
        let total_liabilities: Decimal = liabilities
            .iter()
            .map(|liability| liability.current_balance)
            .sum();
        let liability_breakdown = liabilities
            .into_iter()
            .map(|liability| LiabilityBreakdown {
                name: liability.name,
                balance: liability.current_balance,
            })
            .collect();

        let nav = total_asset_value + total_bank_balance - total_liabilities;
        debug!(
            "NAV: assets {} + bank {} - liabilities {} = {}",
            total_asset_value, total_bank_balance, total_liabilities, nav
        );

        Ok(NavSummary {
            total_asset_value,
            total_bank_balance,
            total_liabilities,
            nav,
            asset_breakdown: by_kind.into_values().collect(),
            bank_breakdown: by_currency.into_values().collect(),
            liability_breakdown,
        })
    }
}
