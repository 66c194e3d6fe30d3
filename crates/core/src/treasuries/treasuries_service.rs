use std::sync::Arc;

use super::treasuries_model::{NewTreasury, Treasury};
use super::treasuries_traits::{TreasuryRepositoryTrait, TreasuryServiceTrait};
use crate::errors::Result;

/// Service for treasury bookkeeping.
pub struct TreasuryService {
    repository: Arc<dyn TreasuryRepositoryTrait>,
}

impl TreasuryService {
    pub fn new(repository: Arc<dyn TreasuryRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl TreasuryServiceTrait for TreasuryService {
    async fn create_treasury(&self, new_treasury: NewTreasury) -> Result<Treasury> {
        new_treasury.validate()?;
        self.repository.create(new_treasury).await
    }

    fn get_treasury(&self, treasury_id: &str) -> Result<Treasury> {
        self.repository.get_by_id(treasury_id)
    }

    fn get_main_treasury(&self, company_id: &str) -> Result<Treasury> {
        self.repository.get_main(company_id)
    }

    fn get_employee_treasury(&self, employee_id: &str) -> Result<Option<Treasury>> {
        self.repository.find_by_employee(employee_id)
    }

    fn list_treasuries(&self, company_id: &str) -> Result<Vec<Treasury>> {
        self.repository.list(company_id)
    }
}
