//! SQLite storage implementation for the asset event ledger.

mod model;
mod repository;

pub use model::AssetEventDB;
pub use repository::AssetEventRepository;
