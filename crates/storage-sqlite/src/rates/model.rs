//! Database model for exchange rate settings. Rates are stored as text.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use sarraf_core::errors::Error;
use sarraf_core::rates::ExchangeRateSettings;

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::exchange_rates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExchangeRateDb {
    pub id: String,
    pub company_id: String,
    pub sd_to_eg_rate: String,
    pub eg_to_sd_rate: String,
    pub wholesale_rate: String,
    pub wholesale_threshold: String,
    pub ewallet_commission: String,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<ExchangeRateDb> for ExchangeRateSettings {
    type Error = Error;

    fn try_from(db: ExchangeRateDb) -> Result<Self, Error> {
        Ok(Self {
            id: db.id,
            company_id: db.company_id,
            sd_to_eg_rate: Decimal::from_str(&db.sd_to_eg_rate)?,
            eg_to_sd_rate: Decimal::from_str(&db.eg_to_sd_rate)?,
            wholesale_rate: Decimal::from_str(&db.wholesale_rate)?,
            wholesale_threshold: Decimal::from_str(&db.wholesale_threshold)?,
            ewallet_commission: Decimal::from_str(&db.ewallet_commission)?,
            updated_at: db.updated_at,
        })
    }
}

impl From<ExchangeRateSettings> for ExchangeRateDb {
    fn from(domain: ExchangeRateSettings) -> Self {
        Self {
            id: domain.id,
            company_id: domain.company_id,
            sd_to_eg_rate: domain.sd_to_eg_rate.to_string(),
            eg_to_sd_rate: domain.eg_to_sd_rate.to_string(),
            wholesale_rate: domain.wholesale_rate.to_string(),
            wholesale_threshold: domain.wholesale_threshold.to_string(),
            ewallet_commission: domain.ewallet_commission.to_string(),
            updated_at: domain.updated_at,
        }
    }
}
