use std::sync::Arc;

use super::wallets_model::{EWallet, EWalletUpdate, NewEWallet};
use super::wallets_traits::{WalletRepositoryTrait, WalletServiceTrait};
use crate::errors::Result;

/// Service for e-wallet management.
pub struct WalletService {
    repository: Arc<dyn WalletRepositoryTrait>,
}

impl WalletService {
    pub fn new(repository: Arc<dyn WalletRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl WalletServiceTrait for WalletService {
    async fn create_wallet(&self, new_wallet: NewEWallet) -> Result<EWallet> {
        new_wallet.validate()?;
        self.repository.create(new_wallet).await
    }

    async fn update_wallet(&self, wallet_update: EWalletUpdate) -> Result<EWallet> {
        wallet_update.validate()?;
        self.repository.update(wallet_update).await
    }

    fn get_wallet(&self, wallet_id: &str) -> Result<EWallet> {
        self.repository.get_by_id(wallet_id)
    }

    fn list_wallets(
        &self,
        company_id: &str,
        is_active_filter: Option<bool>,
    ) -> Result<Vec<EWallet>> {
        self.repository.list(company_id, is_active_filter)
    }

    fn list_employee_wallets(&self, employee_id: &str) -> Result<Vec<EWallet>> {
        self.repository.list_by_employee(employee_id)
    }
}
