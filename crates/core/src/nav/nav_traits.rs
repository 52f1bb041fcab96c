use super::nav_model::NavSummary;
use crate::Result;

/// Trait defining the contract for the NAV aggregator.
pub trait NavServiceTrait: Send + Sync {
    /// Aggregates current asset, bank, and liability state into the fund's
    /// net asset value. Read-only.
    fn calculate_current_nav(&self) -> Result<NavSummary>;
}
