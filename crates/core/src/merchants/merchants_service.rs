use std::sync::Arc;

use super::merchants_model::{Merchant, MerchantEntry, MerchantUpdate, NewMerchant};
use super::merchants_traits::{MerchantRepositoryTrait, MerchantServiceTrait};
use crate::errors::Result;

/// Service for merchant management.
pub struct MerchantService {
    repository: Arc<dyn MerchantRepositoryTrait>,
}

impl MerchantService {
    pub fn new(repository: Arc<dyn MerchantRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl MerchantServiceTrait for MerchantService {
    async fn create_merchant(&self, new_merchant: NewMerchant) -> Result<Merchant> {
        new_merchant.validate()?;
        self.repository.create(new_merchant).await
    }

    async fn update_merchant(&self, merchant_update: MerchantUpdate) -> Result<Merchant> {
        merchant_update.validate()?;
        self.repository.update(merchant_update).await
    }

    fn get_merchant(&self, merchant_id: &str) -> Result<Merchant> {
        self.repository.get_by_id(merchant_id)
    }

    fn list_merchants(
        &self,
        company_id: &str,
        is_active_filter: Option<bool>,
    ) -> Result<Vec<Merchant>> {
        self.repository.list(company_id, is_active_filter)
    }

    fn list_merchant_entries(&self, merchant_id: &str) -> Result<Vec<MerchantEntry>> {
        self.repository.list_entries(merchant_id)
    }
}
