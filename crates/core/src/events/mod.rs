//! Asset event ledger - replay arithmetic and the valuation engine.

pub mod ledger;

mod events_model;
mod events_traits;
mod valuation_service;

pub use events_model::*;
pub use events_traits::{AssetEventRepositoryTrait, ValuationServiceTrait};
pub use valuation_service::ValuationService;

#[cfg(test)]
mod ledger_tests;
