//! SQLite storage implementation for period snapshots.

mod model;
mod repository;

pub use model::{InvestorSnapshotDB, PeriodSnapshotDB};
pub use repository::SnapshotRepository;
