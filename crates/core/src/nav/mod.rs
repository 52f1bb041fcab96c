//! NAV module - point-in-time fund valuation.

mod nav_model;
mod nav_service;
mod nav_traits;

pub use nav_model::*;
pub use nav_service::NavService;
pub use nav_traits::NavServiceTrait;
