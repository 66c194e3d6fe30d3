//! Database model for treasuries.
//!
//! Balances are stored as text and parsed into `Decimal` on the way out, so
//! no precision is lost to SQLite's float affinity.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use sarraf_core::errors::Error;
use sarraf_core::treasuries::{NewTreasury, Treasury, TreasuryKind};

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
#[diesel(table_name = crate::schema::treasuries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TreasuryDb {
    pub id: String,
    pub company_id: String,
    pub kind: String,
    pub employee_id: Option<String>,
    pub egp_balance: String,
    pub sdg_balance: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<TreasuryDb> for Treasury {
    type Error = Error;

    fn try_from(db: TreasuryDb) -> Result<Self, Error> {
        Ok(Self {
            id: db.id,
            company_id: db.company_id,
            kind: TreasuryKind::parse(&db.kind)?,
            employee_id: db.employee_id,
            egp_balance: Decimal::from_str(&db.egp_balance)?,
            sdg_balance: Decimal::from_str(&db.sdg_balance)?,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewTreasury> for TreasuryDb {
    fn from(domain: NewTreasury) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(),
            company_id: domain.company_id,
            kind: domain.kind.as_str().to_string(),
            employee_id: domain.employee_id,
            egp_balance: Decimal::ZERO.to_string(),
            sdg_balance: Decimal::ZERO.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<Treasury> for TreasuryDb {
    fn from(domain: Treasury) -> Self {
        Self {
            id: domain.id,
            company_id: domain.company_id,
            kind: domain.kind.as_str().to_string(),
            employee_id: domain.employee_id,
            egp_balance: domain.egp_balance.to_string(),
            sdg_balance: domain.sdg_balance.to_string(),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
