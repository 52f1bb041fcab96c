use super::banking_model::*;
use crate::Result;
use async_trait::async_trait;

/// Trait defining the contract for BankBalance repository operations.
#[async_trait]
pub trait BankBalanceRepositoryTrait: Send + Sync {
    fn get_balance(&self, balance_id: &str) -> Result<BankBalance>;
    fn get_balances(&self) -> Result<Vec<BankBalance>>;
    async fn create_balance(&self, new_balance: NewBankBalance) -> Result<BankBalance>;
    async fn delete_balance(&self, balance_id: &str) -> Result<()>;
}

/// Trait defining the contract for Liability repository operations.
#[async_trait]
pub trait LiabilityRepositoryTrait: Send + Sync {
    fn get_liability(&self, liability_id: &str) -> Result<Liability>;
    fn get_liabilities(&self) -> Result<Vec<Liability>>;
    async fn create_liability(&self, new_liability: NewLiability) -> Result<Liability>;
    async fn update_liability(&self, update: LiabilityUpdate) -> Result<Liability>;
    async fn delete_liability(&self, liability_id: &str) -> Result<()>;
}

/// Trait defining the contract for banking service operations.
#[async_trait]
pub trait BankingServiceTrait: Send + Sync {
    fn get_balances(&self) -> Result<Vec<BankBalance>>;
    /// The latest-dated row per (account name, bank name) key.
    fn get_latest_balances(&self) -> Result<Vec<BankBalance>>;
    async fn record_balance(&self, new_balance: NewBankBalance) -> Result<BankBalance>;
    async fn delete_balance(&self, balance_id: &str) -> Result<()>;

    fn get_liability(&self, liability_id: &str) -> Result<Liability>;
    fn get_liabilities(&self) -> Result<Vec<Liability>>;
    async fn create_liability(&self, new_liability: NewLiability) -> Result<Liability>;
    async fn update_liability(&self, update: LiabilityUpdate) -> Result<Liability>;
    async fn delete_liability(&self, liability_id: &str) -> Result<()>;
}
