use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::events::{Collection, MutationKind, StoreEvent, StoreNotifier};
use crate::rates::ExchangeRateDb;
use crate::schema::{companies, exchange_rates, treasuries, users};
use crate::treasuries::TreasuryDb;
use crate::users::UserDb;

use super::model::CompanyDb;
use sarraf_core::companies::{Company, CompanyRepositoryTrait, CompanyStatus};
use sarraf_core::errors::{DatabaseError, Error, Result};
use sarraf_core::rates::ExchangeRateSettings;
use sarraf_core::treasuries::Treasury;
use sarraf_core::users::User;

/// Repository for tenant rows.
pub struct CompanyRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    notifier: StoreNotifier,
}

impl CompanyRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle, notifier: StoreNotifier) -> Self {
        Self {
            pool,
            writer,
            notifier,
        }
    }
}

#[async_trait]
impl CompanyRepositoryTrait for CompanyRepository {
    async fn create_cascade(
        &self,
        company: Company,
        admin: User,
        main_treasury: Treasury,
        default_rates: ExchangeRateSettings,
    ) -> Result<Company> {
        let company_db: CompanyDb = company.into();
        let admin_db: UserDb = admin.into();
        let treasury_db: TreasuryDb = main_treasury.into();
        let rates_db: ExchangeRateDb = default_rates.into();

        let company: Company = self
            .writer
            .exec(move |conn| {
                diesel::insert_into(companies::table)
                    .values(&company_db)
                    .execute(conn)
                    .into_core()?;
                diesel::insert_into(users::table)
                    .values(&admin_db)
                    .execute(conn)
                    .into_core()?;
                diesel::insert_into(treasuries::table)
                    .values(&treasury_db)
                    .execute(conn)
                    .into_core()?;
                diesel::insert_into(exchange_rates::table)
                    .values(&rates_db)
                    .execute(conn)
                    .into_core()?;

                company_db.try_into()
            })
            .await?;

        self.notifier.notify(StoreEvent::new(
            Collection::Companies,
            MutationKind::Created,
            company.id.clone(),
        ));
        Ok(company)
    }

    fn get_by_id(&self, company_id: &str) -> Result<Company> {
        let mut conn = get_connection(&self.pool)?;

        let row = companies::table
            .select(CompanyDb::as_select())
            .find(company_id)
            .first::<CompanyDb>(&mut conn)
            .into_core()?;

        row.try_into()
    }

    fn find_by_username(&self, username_param: &str) -> Result<Option<Company>> {
        let mut conn = get_connection(&self.pool)?;

        let row = companies::table
            .select(CompanyDb::as_select())
            .filter(companies::username.eq(username_param))
            .first::<CompanyDb>(&mut conn)
            .optional()
            .into_core()?;

        row.map(Company::try_from).transpose()
    }

    fn list(&self, status_filter: Option<CompanyStatus>) -> Result<Vec<Company>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = companies::table.into_boxed();
        if let Some(status) = status_filter {
            query = query.filter(companies::status.eq(status.as_str()));
        }

        let rows = query
            .select(CompanyDb::as_select())
            .order(companies::created_at.asc())
            .load::<CompanyDb>(&mut conn)
            .into_core()?;

        rows.into_iter().map(Company::try_from).collect()
    }

    async fn set_status(&self, company_id: &str, status: CompanyStatus) -> Result<()> {
        let id_owned = company_id.to_string();

        self.writer
            .exec(move |conn| {
                let affected = diesel::update(companies::table.find(&id_owned))
                    .set((
                        companies::status.eq(status.as_str()),
                        companies::updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;

                if affected == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(id_owned)));
                }
                Ok(())
            })
            .await?;

        self.notifier.notify(StoreEvent::new(
            Collection::Companies,
            MutationKind::Updated,
            company_id,
        ));
        Ok(())
    }

    async fn purge(&self, company_id: &str) -> Result<()> {
        let id_owned = company_id.to_string();

        // Dependent rows go with the company via ON DELETE CASCADE.
        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(companies::table.find(&id_owned))
                    .execute(conn)
                    .into_core()?;

                if affected == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(id_owned)));
                }
                Ok(())
            })
            .await?;

        self.notifier.notify(StoreEvent::new(
            Collection::Companies,
            MutationKind::Deleted,
            company_id,
        ));
        Ok(())
    }
}
