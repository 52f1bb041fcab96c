//! Investors module - capital participants, cashflows, and ownership math.

mod cashflow_service;
mod investors_model;
mod investors_traits;
mod ownership_service;

pub use cashflow_service::CashflowService;
pub use investors_model::*;
pub use investors_traits::{
    CashflowRepositoryTrait, CashflowServiceTrait, InvestorRepositoryTrait, OwnershipServiceTrait,
};
pub use ownership_service::OwnershipService;
