//! Snapshots module - immutable point-in-time fund valuations.

mod snapshots_model;
mod snapshots_service;
mod snapshots_traits;

pub use snapshots_model::*;
pub use snapshots_service::SnapshotService;
pub use snapshots_traits::{SnapshotRepositoryTrait, SnapshotServiceTrait};

#[cfg(test)]
mod snapshots_service_tests;
