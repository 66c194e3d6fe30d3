//! Merchant repository and service traits.
//!
//! Merchant balances move only through ledger postings; entries are
//! appended in the same storage transaction as the balance delta.

use async_trait::async_trait;

use super::merchants_model::{Merchant, MerchantEntry, MerchantUpdate, NewMerchant};
use crate::errors::Result;

/// Contract for merchant persistence.
#[async_trait]
pub trait MerchantRepositoryTrait: Send + Sync {
    async fn create(&self, new_merchant: NewMerchant) -> Result<Merchant>;

    async fn update(&self, merchant_update: MerchantUpdate) -> Result<Merchant>;

    fn get_by_id(&self, merchant_id: &str) -> Result<Merchant>;

    fn list(&self, company_id: &str, is_active_filter: Option<bool>) -> Result<Vec<Merchant>>;

    /// Entries for one merchant, newest first.
    fn list_entries(&self, merchant_id: &str) -> Result<Vec<MerchantEntry>>;
}

/// Contract for merchant management.
#[async_trait]
pub trait MerchantServiceTrait: Send + Sync {
    async fn create_merchant(&self, new_merchant: NewMerchant) -> Result<Merchant>;

    async fn update_merchant(&self, merchant_update: MerchantUpdate) -> Result<Merchant>;

    fn get_merchant(&self, merchant_id: &str) -> Result<Merchant>;

    fn list_merchants(
        &self,
        company_id: &str,
        is_active_filter: Option<bool>,
    ) -> Result<Vec<Merchant>>;

    fn list_merchant_entries(&self, merchant_id: &str) -> Result<Vec<MerchantEntry>>;
}
