use std::collections::HashMap;
use std::sync::Arc;

use super::banking_model::*;
use super::banking_traits::{
    BankBalanceRepositoryTrait, BankingServiceTrait, LiabilityRepositoryTrait,
};
use crate::Result;
use async_trait::async_trait;

/// Reduces an append-only balance history to the latest row per account key.
/// Ties on the report date are broken by the row recorded last.
pub fn latest_per_account(rows: Vec<BankBalance>) -> Vec<BankBalance> {
    let mut latest: HashMap<(String, String), BankBalance> = HashMap::new();
    for row in rows {
        let key = row.account_key();
        match latest.get(&key) {
            Some(current) if (current.date, current.created_at) >= (row.date, row.created_at) => {}
            _ => {
                latest.insert(key, row);
            }
        }
    }
    let mut rows: Vec<BankBalance> = latest.into_values().collect();
    rows.sort_by(|a, b| a.account_key().cmp(&b.account_key()));
    rows
}

/// Service for bank balance reporting and liabilities.
pub struct BankingService {
    bank_balance_repository: Arc<dyn BankBalanceRepositoryTrait>,
    liability_repository: Arc<dyn LiabilityRepositoryTrait>,
}

impl BankingService {
    pub fn new(
        bank_balance_repository: Arc<dyn BankBalanceRepositoryTrait>,
        liability_repository: Arc<dyn LiabilityRepositoryTrait>,
    ) -> Self {
        Self {
            bank_balance_repository,
            liability_repository,
        }
    }
}

#[async_trait]
impl BankingServiceTrait for BankingService {
    fn get_balances(&self) -> Result<Vec<BankBalance>> {
        self.bank_balance_repository.get_balances()
    }

    fn get_latest_balances(&self) -> Result<Vec<BankBalance>> {
        Ok(latest_per_account(
            self.bank_balance_repository.get_balances()?,
        ))
    }

    async fn record_balance(&self, new_balance: NewBankBalance) -> Result<BankBalance> {
        new_balance.validate()?;
        self.bank_balance_repository
            .create_balance(new_balance)
            .await
    }

    async fn delete_balance(&self, balance_id: &str) -> Result<()> {
        self.bank_balance_repository.delete_balance(balance_id).await
    }

    fn get_liability(&self, liability_id: &str) -> Result<Liability> {
        self.liability_repository.get_liability(liability_id)
    }

    fn get_liabilities(&self) -> Result<Vec<Liability>> {
        self.liability_repository.get_liabilities()
    }

    async fn create_liability(&self, new_liability: NewLiability) -> Result<Liability> {
        new_liability.validate()?;
        self.liability_repository
            .create_liability(new_liability)
            .await
    }

    async fn update_liability(&self, update: LiabilityUpdate) -> Result<Liability> {
        self.liability_repository.update_liability(update).await
    }

    async fn delete_liability(&self, liability_id: &str) -> Result<()> {
        self.liability_repository.delete_liability(liability_id).await
    }
}
