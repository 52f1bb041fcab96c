//! SQLite storage implementation for bank balances and liabilities.

mod model;
mod repository;

pub use model::{BankBalanceDB, LiabilityDB};
pub use repository::{BankBalanceRepository, LiabilityRepository};
