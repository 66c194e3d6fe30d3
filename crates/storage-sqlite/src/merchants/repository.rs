use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::events::{Collection, MutationKind, StoreEvent, StoreNotifier};
use crate::schema::{merchant_entries, merchants};

use super::model::{MerchantDb, MerchantEntryDb};
use sarraf_core::errors::Result;
use sarraf_core::merchants::{
    Merchant, MerchantEntry, MerchantRepositoryTrait, MerchantUpdate, NewMerchant,
};

/// Repository for merchant rows and their append-only entries. Balance
/// columns and entry inserts are owned by the ledger repository.
pub struct MerchantRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    notifier: StoreNotifier,
}

impl MerchantRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle, notifier: StoreNotifier) -> Self {
        Self {
            pool,
            writer,
            notifier,
        }
    }
}

#[async_trait]
impl MerchantRepositoryTrait for MerchantRepository {
    async fn create(&self, new_merchant: NewMerchant) -> Result<Merchant> {
        new_merchant.validate()?;

        let mut merchant_db: MerchantDb = new_merchant.into();
        merchant_db.id = uuid::Uuid::new_v4().to_string();

        let merchant: Merchant = self
            .writer
            .exec(move |conn| {
                diesel::insert_into(merchants::table)
                    .values(&merchant_db)
                    .execute(conn)
                    .into_core()?;

                merchant_db.try_into()
            })
            .await?;

        self.notifier.notify(StoreEvent::new(
            Collection::Merchants,
            MutationKind::Created,
            merchant.id.clone(),
        ));
        Ok(merchant)
    }

    async fn update(&self, merchant_update: MerchantUpdate) -> Result<Merchant> {
        merchant_update.validate()?;

        let merchant: Merchant = self
            .writer
            .exec(move |conn| {
                let affected = diesel::update(merchants::table.find(&merchant_update.id))
                    .set((
                        merchants::name.eq(&merchant_update.name),
                        merchants::phone.eq(&merchant_update.phone),
                        merchants::is_active.eq(merchant_update.is_active),
                        merchants::updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;

                if affected == 0 {
                    return Err(diesel::result::Error::NotFound).into_core();
                }

                let stored = merchants::table
                    .select(MerchantDb::as_select())
                    .find(&merchant_update.id)
                    .first::<MerchantDb>(conn)
                    .into_core()?;

                stored.try_into()
            })
            .await?;

        self.notifier.notify(StoreEvent::new(
            Collection::Merchants,
            MutationKind::Updated,
            merchant.id.clone(),
        ));
        Ok(merchant)
    }

    fn get_by_id(&self, merchant_id: &str) -> Result<Merchant> {
        let mut conn = get_connection(&self.pool)?;

        let row = merchants::table
            .select(MerchantDb::as_select())
            .find(merchant_id)
            .first::<MerchantDb>(&mut conn)
            .into_core()?;

        row.try_into()
    }

    fn list(
        &self,
        company_id_param: &str,
        is_active_filter: Option<bool>,
    ) -> Result<Vec<Merchant>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = merchants::table
            .filter(merchants::company_id.eq(company_id_param))
            .into_boxed();
        if let Some(active) = is_active_filter {
            query = query.filter(merchants::is_active.eq(active));
        }

        let rows = query
            .select(MerchantDb::as_select())
            .order(merchants::name.asc())
            .load::<MerchantDb>(&mut conn)
            .into_core()?;

        rows.into_iter().map(Merchant::try_from).collect()
    }

    fn list_entries(&self, merchant_id_param: &str) -> Result<Vec<MerchantEntry>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = merchant_entries::table
            .select(MerchantEntryDb::as_select())
            .filter(merchant_entries::merchant_id.eq(merchant_id_param))
            .order(merchant_entries::created_at.desc())
            .load::<MerchantEntryDb>(&mut conn)
            .into_core()?;

        rows.into_iter().map(MerchantEntry::try_from).collect()
    }
}
