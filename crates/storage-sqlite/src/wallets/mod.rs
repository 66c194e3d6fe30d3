//! SQLite storage implementation for e-wallets.

mod model;
mod repository;

pub use model::EWalletDb;
pub use repository::WalletRepository;
