//! Ownership calculator: capital and proportional ownership per investor.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;

use super::investors_model::{CashflowType, InvestorOwnership};
use super::investors_traits::{
    CashflowRepositoryTrait, InvestorRepositoryTrait, OwnershipServiceTrait,
};
use crate::constants::DECIMAL_PRECISION;
use crate::Result;

/// Computes ownership over the full investor population.
///
/// Nothing here is persisted: capital and percentages are derived from the
/// cashflow history on every call, so they can never go stale when a
/// cashflow changes.
pub struct OwnershipService {
    investor_repository: Arc<dyn InvestorRepositoryTrait>,
    cashflow_repository: Arc<dyn CashflowRepositoryTrait>,
}

impl OwnershipService {
    pub fn new(
        investor_repository: Arc<dyn InvestorRepositoryTrait>,
        cashflow_repository: Arc<dyn CashflowRepositoryTrait>,
    ) -> Self {
        Self {
            investor_repository,
            cashflow_repository,
        }
    }
}

impl OwnershipServiceTrait for OwnershipService {
    fn calculate_ownership(&self) -> Result<Vec<InvestorOwnership>> {
        let investors = self.investor_repository.get_investors()?;
        let cashflows = self.cashflow_repository.get_cashflows()?;

        let mut totals: HashMap<&str, (Decimal, Decimal)> = HashMap::new();
        for cashflow in &cashflows {
            let entry = totals
                .entry(cashflow.investor_id.as_str())
                .or_insert((Decimal::ZERO, Decimal::ZERO));
            match cashflow.flow_type {
                CashflowType::Deposit => entry.0 += cashflow.amount,
                CashflowType::Withdrawal => entry.1 += cashflow.amount,
            }
        }

        let mut rows: Vec<InvestorOwnership> = investors
            .iter()
            .map(|investor| {
                let (deposits, withdrawals) = totals
                    .get(investor.id.as_str())
                    .copied()
                    .unwrap_or((Decimal::ZERO, Decimal::ZERO));
                InvestorOwnership {
                    investor_id: investor.id.clone(),
                    investor_name: investor.name.clone(),
                    total_deposits: deposits,
                    total_withdrawals: withdrawals,
                    capital_amount: deposits - withdrawals,
                    ownership_percent: Decimal::ZERO,
                }
            })
            .collect();

        let total_capital: Decimal = rows.iter().map(|row| row.capital_amount).sum();
        if total_capital.is_zero() {
            // Everyone owns 0% of an empty fund.
            return Ok(rows);
        }

        for row in rows.iter_mut() {
            row.ownership_percent =
                (row.capital_amount / total_capital * dec!(100)).round_dp(DECIMAL_PRECISION);
        }

        // Rounding can leave the percentages a hair off 100; park the residual
        // on the largest capital so the sum is exact.
        let residual = dec!(100) - rows.iter().map(|row| row.ownership_percent).sum::<Decimal>();
        if !residual.is_zero() {
            if let Some(largest) = rows
                .iter_mut()
                .max_by(|a, b| a.capital_amount.cmp(&b.capital_amount))
            {
                largest.ownership_percent += residual;
            }
        }

        Ok(rows)
    }
}
