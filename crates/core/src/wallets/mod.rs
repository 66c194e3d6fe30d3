//! Wallets module - e-wallet float models, services, and traits.

mod wallets_model;
mod wallets_service;
mod wallets_traits;

pub use wallets_model::{EWallet, EWalletUpdate, NewEWallet};
pub use wallets_service::WalletService;
pub use wallets_traits::{WalletRepositoryTrait, WalletServiceTrait};
