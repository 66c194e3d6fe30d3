//! Sarraf Core - Domain entities, services, and traits.
//!
//! This crate contains the ledger engine for a multi-tenant currency
//! exchange back office. It is database-agnostic and defines traits that
//! are implemented by the `storage-sqlite` crate.

pub mod companies;
pub mod constants;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod merchants;
pub mod rates;
pub mod snapshot;
pub mod transactions;
pub mod treasuries;
pub mod users;
pub mod wallets;

// Re-export common types
pub use currency::{Currency, ExchangeDirection};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
