use super::investors_model::*;
use crate::Result;
use async_trait::async_trait;

/// Trait defining the contract for Investor repository operations.
#[async_trait]
pub trait InvestorRepositoryTrait: Send + Sync {
    fn get_investor(&self, investor_id: &str) -> Result<Investor>;
    fn get_investors(&self) -> Result<Vec<Investor>>;
    async fn create_investor(&self, new_investor: NewInvestor) -> Result<Investor>;
    async fn update_investor(&self, update: InvestorUpdate) -> Result<Investor>;
    /// Deletes the investor and their cashflow history atomically.
    async fn delete_investor(&self, investor_id: &str) -> Result<()>;
}

/// Trait defining the contract for InvestorCashflow repository operations.
#[async_trait]
pub trait CashflowRepositoryTrait: Send + Sync {
    fn get_cashflow(&self, cashflow_id: &str) -> Result<InvestorCashflow>;
    fn get_cashflows(&self) -> Result<Vec<InvestorCashflow>>;
    fn get_cashflows_for_investor(&self, investor_id: &str) -> Result<Vec<InvestorCashflow>>;
    async fn create_cashflow(&self, new_cashflow: NewCashflow) -> Result<InvestorCashflow>;
    async fn update_cashflow(&self, update: CashflowUpdate) -> Result<InvestorCashflow>;
    async fn delete_cashflow(&self, cashflow_id: &str) -> Result<()>;
}

/// Trait defining the contract for investor/cashflow service operations.
#[async_trait]
pub trait CashflowServiceTrait: Send + Sync {
    fn get_investor(&self, investor_id: &str) -> Result<Investor>;
    fn get_investors(&self) -> Result<Vec<Investor>>;
    async fn create_investor(&self, new_investor: NewInvestor) -> Result<Investor>;
    async fn update_investor(&self, update: InvestorUpdate) -> Result<Investor>;
    async fn delete_investor(&self, investor_id: &str) -> Result<()>;

    fn get_cashflows_for_investor(&self, investor_id: &str) -> Result<Vec<InvestorCashflow>>;
    async fn create_cashflow(&self, new_cashflow: NewCashflow) -> Result<InvestorCashflow>;
    async fn update_cashflow(&self, update: CashflowUpdate) -> Result<InvestorCashflow>;
    async fn delete_cashflow(&self, cashflow_id: &str) -> Result<()>;
}

/// Trait defining the contract for the ownership calculator.
pub trait OwnershipServiceTrait: Send + Sync {
    /// Computes every investor's capital and ownership percent over the full
    /// population. The denominator depends on everyone, so this is never a
    /// per-investor computation.
    fn calculate_ownership(&self) -> Result<Vec<InvestorOwnership>>;
}
