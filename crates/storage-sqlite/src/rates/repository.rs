use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::events::{Collection, MutationKind, StoreEvent, StoreNotifier};
use crate::schema::exchange_rates;

use super::model::ExchangeRateDb;
use sarraf_core::errors::Result;
use sarraf_core::rates::{ExchangeRateSettings, RateRepositoryTrait, RateSettingsUpdate};

/// Repository for per-tenant rate settings. One row per company.
pub struct RateRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    notifier: StoreNotifier,
}

impl RateRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle, notifier: StoreNotifier) -> Self {
        Self {
            pool,
            writer,
            notifier,
        }
    }
}

#[async_trait]
impl RateRepositoryTrait for RateRepository {
    fn find_for_company(&self, company_id_param: &str) -> Result<Option<ExchangeRateSettings>> {
        let mut conn = get_connection(&self.pool)?;

        let row = exchange_rates::table
            .select(ExchangeRateDb::as_select())
            .filter(exchange_rates::company_id.eq(company_id_param))
            .first::<ExchangeRateDb>(&mut conn)
            .optional()
            .into_core()?;

        row.map(ExchangeRateSettings::try_from).transpose()
    }

    async fn upsert(&self, update: RateSettingsUpdate) -> Result<ExchangeRateSettings> {
        update.validate()?;

        let now = chrono::Utc::now().naive_utc();
        let row = ExchangeRateDb {
            id: uuid::Uuid::new_v4().to_string(),
            company_id: update.company_id,
            sd_to_eg_rate: update.sd_to_eg_rate.to_string(),
            eg_to_sd_rate: update.eg_to_sd_rate.to_string(),
            wholesale_rate: update.wholesale_rate.to_string(),
            wholesale_threshold: update.wholesale_threshold.to_string(),
            ewallet_commission: update.ewallet_commission.to_string(),
            updated_at: now,
        };

        let settings: ExchangeRateSettings = self
            .writer
            .exec(move |conn| {
                // The freshly generated id only applies when the tenant has
                // no settings row yet; on conflict the existing row keeps
                // its id.
                diesel::insert_into(exchange_rates::table)
                    .values(&row)
                    .on_conflict(exchange_rates::company_id)
                    .do_update()
                    .set((
                        exchange_rates::sd_to_eg_rate.eq(&row.sd_to_eg_rate),
                        exchange_rates::eg_to_sd_rate.eq(&row.eg_to_sd_rate),
                        exchange_rates::wholesale_rate.eq(&row.wholesale_rate),
                        exchange_rates::wholesale_threshold.eq(&row.wholesale_threshold),
                        exchange_rates::ewallet_commission.eq(&row.ewallet_commission),
                        exchange_rates::updated_at.eq(row.updated_at),
                    ))
                    .execute(conn)
                    .into_core()?;

                let stored = exchange_rates::table
                    .select(ExchangeRateDb::as_select())
                    .filter(exchange_rates::company_id.eq(&row.company_id))
                    .first::<ExchangeRateDb>(conn)
                    .into_core()?;

                stored.try_into()
            })
            .await?;

        self.notifier.notify(StoreEvent::new(
            Collection::ExchangeRates,
            MutationKind::Updated,
            settings.id.clone(),
        ));
        Ok(settings)
    }
}
