//! SQLite storage implementation for atomic ledger postings.

mod repository;

pub use repository::LedgerRepository;
