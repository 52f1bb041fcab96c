//! SQLite storage implementation for investors and cashflows.

mod model;
mod repository;

pub use model::{InvestorCashflowDB, InvestorDB};
pub use repository::{CashflowRepository, InvestorRepository};
