//! SQLite storage implementation for Fundbook.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `fundbook-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The single-writer actor that serializes all mutations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place where Diesel dependencies exist; `core` is
//! database-agnostic and works with traits.

pub mod db;
pub mod errors;
pub mod parsing;
pub mod schema;

// Repository implementations
pub mod assets;
pub mod banking;
pub mod events;
pub mod investors;
pub mod snapshots;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from fundbook-core for convenience
pub use fundbook_core::errors::{DatabaseError, Error, Result};
