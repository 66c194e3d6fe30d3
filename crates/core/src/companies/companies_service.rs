use chrono::Utc;
use log::{debug, info};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::companies_model::{Company, CompanyStatus, NewCompany};
use super::companies_traits::{CompanyRepositoryTrait, CompanyServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::rates::ExchangeRateSettings;
use crate::treasuries::{Treasury, TreasuryKind};
use crate::users::{password, User, UserRole};

/// Service for tenant lifecycle management.
pub struct CompanyService {
    repository: Arc<dyn CompanyRepositoryTrait>,
}

impl CompanyService {
    pub fn new(repository: Arc<dyn CompanyRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl CompanyServiceTrait for CompanyService {
    async fn create_company(&self, new_company: NewCompany) -> Result<Company> {
        new_company.validate()?;

        if let Some(existing) = self.repository.find_by_username(&new_company.username)? {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Company username '{}' is already taken",
                existing.username
            ))));
        }

        let now = Utc::now().naive_utc();
        let password_hash = password::hash_password(&new_company.password)?;
        let company = Company {
            id: uuid::Uuid::new_v4().to_string(),
            name: new_company.name,
            username: new_company.username,
            password_hash: password_hash.clone(),
            display_name: new_company.display_name,
            subscription_end: new_company.subscription_end,
            status: CompanyStatus::Active,
            created_at: now,
            updated_at: now,
        };

        // Seeded rows: one admin sharing the tenant credentials, the main
        // treasury at zero, and an unconfigured rate row. Rates stay at zero
        // until the admin sets them; the resolver treats zero as not
        // configured.
        let admin = User {
            id: uuid::Uuid::new_v4().to_string(),
            company_id: Some(company.id.clone()),
            username: company.username.clone(),
            password_hash,
            full_name: company.name.clone(),
            role: UserRole::Admin,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let main_treasury = Treasury {
            id: uuid::Uuid::new_v4().to_string(),
            company_id: company.id.clone(),
            kind: TreasuryKind::Main,
            employee_id: None,
            egp_balance: Decimal::ZERO,
            sdg_balance: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        };
        let default_rates = ExchangeRateSettings {
            id: uuid::Uuid::new_v4().to_string(),
            company_id: company.id.clone(),
            sd_to_eg_rate: Decimal::ZERO,
            eg_to_sd_rate: Decimal::ZERO,
            wholesale_rate: Decimal::ZERO,
            wholesale_threshold: Decimal::ZERO,
            ewallet_commission: Decimal::ZERO,
            updated_at: now,
        };

        debug!("Creating company '{}' with seeded defaults", company.name);
        let created = self
            .repository
            .create_cascade(company, admin, main_treasury, default_rates)
            .await?;
        info!("Created company {} ({})", created.name, created.id);
        Ok(created)
    }

    fn get_company(&self, company_id: &str) -> Result<Company> {
        self.repository.get_by_id(company_id)
    }

    fn list_companies(&self, status_filter: Option<CompanyStatus>) -> Result<Vec<Company>> {
        self.repository.list(status_filter)
    }

    async fn suspend_company(&self, company_id: &str) -> Result<()> {
        self.repository
            .set_status(company_id, CompanyStatus::Suspended)
            .await
    }

    async fn reactivate_company(&self, company_id: &str) -> Result<()> {
        self.repository
            .set_status(company_id, CompanyStatus::Active)
            .await
    }

    async fn purge_company(&self, company_id: &str) -> Result<()> {
        self.repository
            .set_status(company_id, CompanyStatus::PurgeScheduled)
            .await?;
        info!("Purging company {} and all dependent rows", company_id);
        self.repository.purge(company_id).await
    }
}
