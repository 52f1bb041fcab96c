use log::debug;
use std::sync::Arc;

use super::investors_model::*;
use super::investors_traits::{
    CashflowRepositoryTrait, CashflowServiceTrait, InvestorRepositoryTrait,
};
use crate::Result;
use async_trait::async_trait;

/// Service for managing investors and their capital cashflows.
pub struct CashflowService {
    investor_repository: Arc<dyn InvestorRepositoryTrait>,
    cashflow_repository: Arc<dyn CashflowRepositoryTrait>,
}

impl CashflowService {
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

#[async_trait]
impl CashflowServiceTrait for CashflowService {
    fn get_investor(&self, investor_id: &str) -> Result<Investor> {
        self.investor_repository.get_investor(investor_id)
    }

    fn get_investors(&self) -> Result<Vec<Investor>> {
        self.investor_repository.get_investors()
    }

    async fn create_investor(&self, new_investor: NewInvestor) -> Result<Investor> {
        new_investor.validate()?;
        self.investor_repository.create_investor(new_investor).await
    }

    async fn update_investor(&self, update: InvestorUpdate) -> Result<Investor> {
        self.investor_repository.update_investor(update).await
    }

    async fn delete_investor(&self, investor_id: &str) -> Result<()> {
        let investor = self.investor_repository.get_investor(investor_id)?;
        debug!("Deleting investor {} ('{}')", investor.id, investor.name);
        self.investor_repository.delete_investor(investor_id).await
    }

    fn get_cashflows_for_investor(&self, investor_id: &str) -> Result<Vec<InvestorCashflow>> {
        self.cashflow_repository
            .get_cashflows_for_investor(investor_id)
    }

    async fn create_cashflow(&self, new_cashflow: NewCashflow) -> Result<InvestorCashflow> {
        new_cashflow.validate()?;
        // NOT_FOUND for a dangling investor beats a foreign key violation.
        self.investor_repository
            .get_investor(&new_cashflow.investor_id)?;
        self.cashflow_repository.create_cashflow(new_cashflow).await
    }

    async fn update_cashflow(&self, update: CashflowUpdate) -> Result<InvestorCashflow> {
        update.validate()?;
        self.cashflow_repository.update_cashflow(update).await
    }

    async fn delete_cashflow(&self, cashflow_id: &str) -> Result<()> {
        self.cashflow_repository.delete_cashflow(cashflow_id).await
    }
}
