//! SQLite storage implementation for the transaction audit trail.

mod model;
mod repository;

pub use model::TransactionDb;
pub use repository::TransactionRepository;
