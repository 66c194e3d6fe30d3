//! Database model for e-wallets. The float is EGP only.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use sarraf_core::errors::Error;
use sarraf_core::wallets::{EWallet, NewEWallet};

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
#[diesel(table_name = crate::schema::e_wallets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EWalletDb {
    pub id: String,
    pub company_id: String,
    pub employee_id: String,
    pub phone_number: String,
    pub provider: String,
    pub balance: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<EWalletDb> for EWallet {
    type Error = Error;

    fn try_from(db: EWalletDb) -> Result<Self, Error> {
        Ok(Self {
            id: db.id,
            company_id: db.company_id,
            employee_id: db.employee_id,
            phone_number: db.phone_number,
            provider: db.provider,
            balance: Decimal::from_str(&db.balance)?,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewEWallet> for EWalletDb {
    fn from(domain: NewEWallet) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(),
            company_id: domain.company_id,
            employee_id: domain.employee_id,
            phone_number: domain.phone_number,
            provider: domain.provider,
            balance: Decimal::ZERO.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
