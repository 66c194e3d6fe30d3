//! Treasury repository and service traits.
//!
//! Balance mutation is deliberately absent here: balances change only
//! through ledger postings (see `crate::ledger`), never through direct
//! treasury updates.

use async_trait::async_trait;

use super::treasuries_model::{NewTreasury, Treasury};
use crate::errors::Result;

/// Contract for treasury persistence.
#[async_trait]
pub trait TreasuryRepositoryTrait: Send + Sync {
    async fn create(&self, new_treasury: NewTreasury) -> Result<Treasury>;

    fn get_by_id(&self, treasury_id: &str) -> Result<Treasury>;

    /// The tenant's main treasury.
    fn get_main(&self, company_id: &str) -> Result<Treasury>;

    fn find_by_employee(&self, employee_id: &str) -> Result<Option<Treasury>>;

    fn list(&self, company_id: &str) -> Result<Vec<Treasury>>;
}

/// Contract for treasury read/bookkeeping operations.
#[async_trait]
pub trait TreasuryServiceTrait: Send + Sync {
    async fn create_treasury(&self, new_treasury: NewTreasury) -> Result<Treasury>;

    fn get_treasury(&self, treasury_id: &str) -> Result<Treasury>;

    fn get_main_treasury(&self, company_id: &str) -> Result<Treasury>;

    fn get_employee_treasury(&self, employee_id: &str) -> Result<Option<Treasury>>;

    fn list_treasuries(&self, company_id: &str) -> Result<Vec<Treasury>>;
}
