//! Fundbook Core - domain entities, services, and traits.
//!
//! This crate contains the accounting core for a private-fund back office:
//! the event-sourced asset valuation ledger, investor ownership math, NAV
//! aggregation, and point-in-time snapshots. It is database-agnostic and
//! defines repository traits that are implemented by the `storage-sqlite`
//! crate.

pub mod assets;
pub mod banking;
pub mod constants;
pub mod errors;
pub mod events;
pub mod investors;
pub mod nav;
pub mod snapshots;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
