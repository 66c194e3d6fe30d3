//! SQLite storage implementation for treasuries.

mod model;
mod repository;

pub use model::TreasuryDb;
pub use repository::TreasuryRepository;
