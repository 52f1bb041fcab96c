//! Assets module - domain models, services, and traits.

mod assets_model;
mod assets_service;
mod assets_traits;

pub use assets_model::*;
pub use assets_service::AssetService;
pub use assets_traits::{AssetRepositoryTrait, AssetServiceTrait};


#[cfg(test)]
mod assets_service_tests;
