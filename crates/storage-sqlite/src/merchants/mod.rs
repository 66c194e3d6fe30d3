//! SQLite storage implementation for merchants and their entries.

mod model;
mod repository;

pub use model::{MerchantDb, MerchantEntryDb};
pub use repository::MerchantRepository;
