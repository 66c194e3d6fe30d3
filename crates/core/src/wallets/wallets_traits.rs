//! E-wallet repository and service traits.

use async_trait::async_trait;

use super::wallets_model::{EWallet, EWalletUpdate, NewEWallet};
use crate::errors::Result;

/// Contract for e-wallet persistence. Balance mutation happens only through
/// ledger postings.
#[async_trait]
pub trait WalletRepositoryTrait: Send + Sync {
    async fn create(&self, new_wallet: NewEWallet) -> Result<EWallet>;

    async fn update(&self, wallet_update: EWalletUpdate) -> Result<EWallet>;

    fn get_by_id(&self, wallet_id: &str) -> Result<EWallet>;

    fn list(&self, company_id: &str, is_active_filter: Option<bool>) -> Result<Vec<EWallet>>;

    fn list_by_employee(&self, employee_id: &str) -> Result<Vec<EWallet>>;
}

/// Contract for e-wallet management.
#[async_trait]
pub trait WalletServiceTrait: Send + Sync {
    async fn create_wallet(&self, new_wallet: NewEWallet) -> Result<EWallet>;

    async fn update_wallet(&self, wallet_update: EWalletUpdate) -> Result<EWallet>;

    fn get_wallet(&self, wallet_id: &str) -> Result<EWallet>;

    fn list_wallets(
        &self,
        company_id: &str,
        is_active_filter: Option<bool>,
    ) -> Result<Vec<EWallet>>;

    fn list_employee_wallets(&self, employee_id: &str) -> Result<Vec<EWallet>>;
}
