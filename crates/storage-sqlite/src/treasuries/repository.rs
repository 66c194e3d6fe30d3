use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::events::{Collection, MutationKind, StoreEvent, StoreNotifier};
use crate::schema::treasuries;

use super::model::TreasuryDb;
use sarraf_core::errors::{DatabaseError, Error, Result, ValidationError};
use sarraf_core::treasuries::{NewTreasury, Treasury, TreasuryKind, TreasuryRepositoryTrait};

/// Repository for treasury rows. Balance columns are written only by the
/// ledger repository.
pub struct TreasuryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    notifier: StoreNotifier,
}

impl TreasuryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle, notifier: StoreNotifier) -> Self {
        Self {
            pool,
            writer,
            notifier,
        }
    }
}

#[async_trait]
impl TreasuryRepositoryTrait for TreasuryRepository {
    async fn create(&self, new_treasury: NewTreasury) -> Result<Treasury> {
        new_treasury.validate()?;

        let is_main = new_treasury.kind == TreasuryKind::Main;
        let mut treasury_db: TreasuryDb = new_treasury.into();
        treasury_db.id = uuid::Uuid::new_v4().to_string();

        let result = self
            .writer
            .exec(move |conn| {
                diesel::insert_into(treasuries::table)
                    .values(&treasury_db)
                    .execute(conn)
                    .into_core()?;

                treasury_db.try_into()
            })
            .await;

        // The partial unique index on (company_id) WHERE kind = 'main'
        // rejects a second main treasury for the tenant.
        let treasury: Treasury = match result {
            Err(Error::Database(DatabaseError::UniqueViolation(_))) if is_main => {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Company already has a main treasury".to_string(),
                )))
            }
            other => other?,
        };

        self.notifier.notify(StoreEvent::new(
            Collection::Treasuries,
            MutationKind::Created,
            treasury.id.clone(),
        ));
        Ok(treasury)
    }

    fn get_by_id(&self, treasury_id: &str) -> Result<Treasury> {
        let mut conn = get_connection(&self.pool)?;

        let row = treasuries::table
            .select(TreasuryDb::as_select())
            .find(treasury_id)
            .first::<TreasuryDb>(&mut conn)
            .into_core()?;

        row.try_into()
    }

    fn get_main(&self, company_id_param: &str) -> Result<Treasury> {
        let mut conn = get_connection(&self.pool)?;

        let row = treasuries::table
            .select(TreasuryDb::as_select())
            .filter(treasuries::company_id.eq(company_id_param))
            .filter(treasuries::kind.eq(TreasuryKind::Main.as_str()))
            .first::<TreasuryDb>(&mut conn)
            .into_core()?;

        row.try_into()
    }

    fn find_by_employee(&self, employee_id_param: &str) -> Result<Option<Treasury>> {
        let mut conn = get_connection(&self.pool)?;

        let row = treasuries::table
            .select(TreasuryDb::as_select())
            .filter(treasuries::employee_id.eq(employee_id_param))
            .first::<TreasuryDb>(&mut conn)
            .optional()
            .into_core()?;

        row.map(Treasury::try_from).transpose()
    }

    fn list(&self, company_id_param: &str) -> Result<Vec<Treasury>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = treasuries::table
            .select(TreasuryDb::as_select())
            .filter(treasuries::company_id.eq(company_id_param))
            .order(treasuries::created_at.asc())
            .load::<TreasuryDb>(&mut conn)
            .into_core()?;

        rows.into_iter().map(Treasury::try_from).collect()
    }
}
