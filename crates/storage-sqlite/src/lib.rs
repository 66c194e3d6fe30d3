//! SQLite storage implementation for the Sarraf ledger engine.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `sarraf-core` and contains:
//! - Connection pooling, PRAGMAs and migrations
//! - The single-writer actor that serializes all mutations
//! - Repository implementations for every domain entity
//! - Database-specific model types (with Diesel derives)
//!
//! This is the only crate in the workspace where Diesel appears; `core` is
//! database-agnostic and works against traits.

pub mod db;
pub mod errors;
pub mod events;
pub mod schema;

// Repository implementations
pub mod companies;
pub mod ledger;
pub mod merchants;
pub mod rates;
pub mod snapshot;
pub mod transactions;
pub mod treasuries;
pub mod users;
pub mod wallets;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};
pub use events::{Collection, MutationKind, StoreEvent, StoreNotifier};

// Re-export from sarraf-core for convenience
pub use sarraf_core::errors::{DatabaseError, Error, Result};
