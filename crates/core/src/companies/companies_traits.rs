//! Company repository and service traits.

use async_trait::async_trait;

use super::companies_model::{Company, CompanyStatus, NewCompany};
use crate::errors::Result;
use crate::rates::ExchangeRateSettings;
use crate::treasuries::Treasury;
use crate::users::User;

/// Contract for tenant persistence.
///
/// Implementations are database-agnostic from the caller's point of view;
/// the multi-row operations are atomic in the storage layer.
#[async_trait]
pub trait CompanyRepositoryTrait: Send + Sync {
    /// Inserts the company together with its seeded admin user, main
    /// treasury and default exchange rate row, as one unit.
    async fn create_cascade(
        &self,
        company: Company,
        admin: User,
        main_treasury: Treasury,
        default_rates: ExchangeRateSettings,
    ) -> Result<Company>;

    fn get_by_id(&self, company_id: &str) -> Result<Company>;

    fn find_by_username(&self, username: &str) -> Result<Option<Company>>;

    fn list(&self, status_filter: Option<CompanyStatus>) -> Result<Vec<Company>>;

    async fn set_status(&self, company_id: &str, status: CompanyStatus) -> Result<()>;

    /// Hard-deletes the company and every dependent row, as one unit.
    async fn purge(&self, company_id: &str) -> Result<()>;
}

/// Contract for tenant lifecycle operations.
#[async_trait]
pub trait CompanyServiceTrait: Send + Sync {
    /// Creates a tenant, cascading its admin user, main treasury and
    /// default exchange rate settings.
    async fn create_company(&self, new_company: NewCompany) -> Result<Company>;

    fn get_company(&self, company_id: &str) -> Result<Company>;

    fn list_companies(&self, status_filter: Option<CompanyStatus>) -> Result<Vec<Company>>;

    async fn suspend_company(&self, company_id: &str) -> Result<()>;

    async fn reactivate_company(&self, company_id: &str) -> Result<()>;

    /// Marks the tenant for purge and then cascades the hard delete.
    async fn purge_company(&self, company_id: &str) -> Result<()>;
}
