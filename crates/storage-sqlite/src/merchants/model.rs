//! Database models for merchants and merchant entries.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use sarraf_core::currency::Currency;
use sarraf_core::errors::Error;
use sarraf_core::merchants::{
    Merchant, MerchantEntry, MerchantEntryType, NewMerchant, NewMerchantEntry,
};

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
#[diesel(table_name = crate::schema::merchants)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MerchantDb {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub phone: Option<String>,
    pub egp_balance: String,
    pub sdg_balance: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<MerchantDb> for Merchant {
    type Error = Error;

    fn try_from(db: MerchantDb) -> Result<Self, Error> {
        Ok(Self {
            id: db.id,
            company_id: db.company_id,
            name: db.name,
            phone: db.phone,
            egp_balance: Decimal::from_str(&db.egp_balance)?,
            sdg_balance: Decimal::from_str(&db.sdg_balance)?,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewMerchant> for MerchantDb {
    fn from(domain: NewMerchant) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(),
            company_id: domain.company_id,
            name: domain.name,
            phone: domain.phone,
            egp_balance: Decimal::ZERO.to_string(),
            sdg_balance: Decimal::ZERO.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::merchant_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MerchantEntryDb {
    pub id: String,
    pub merchant_id: String,
    pub company_id: String,
    pub entry_type: String,
    pub currency: String,
    pub amount: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<MerchantEntryDb> for MerchantEntry {
    type Error = Error;

    fn try_from(db: MerchantEntryDb) -> Result<Self, Error> {
        Ok(Self {
            id: db.id,
            merchant_id: db.merchant_id,
            company_id: db.company_id,
            entry_type: MerchantEntryType::parse(&db.entry_type)?,
            currency: Currency::from_str(&db.currency)?,
            amount: Decimal::from_str(&db.amount)?,
            description: db.description,
            created_at: db.created_at,
        })
    }
}

impl From<NewMerchantEntry> for MerchantEntryDb {
    fn from(domain: NewMerchantEntry) -> Self {
        Self {
            id: String::new(),
            merchant_id: domain.merchant_id,
            company_id: domain.company_id,
            entry_type: domain.entry_type.as_str().to_string(),
            currency: domain.currency.as_str().to_string(),
            amount: domain.amount.to_string(),
            description: domain.description,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
