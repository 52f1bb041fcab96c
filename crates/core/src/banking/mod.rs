//! Banking module - bank balance reporting and liabilities.

mod banking_model;
mod banking_service;
mod banking_traits;

pub use banking_model::*;
pub use banking_service::{latest_per_account, BankingService};
pub use banking_traits::{
    BankBalanceRepositoryTrait, BankingServiceTrait, LiabilityRepositoryTrait,
};
