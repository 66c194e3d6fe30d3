//! Database model for companies.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use sarraf_core::companies::{Company, CompanyStatus};
use sarraf_core::errors::Error;

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
#[diesel(table_name = crate::schema::companies)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CompanyDb {
    pub id: String,
    pub name: String,
    pub username: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub subscription_end: Option<NaiveDateTime>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<CompanyDb> for Company {
    type Error = Error;

    fn try_from(db: CompanyDb) -> Result<Self, Error> {
        Ok(Self {
            id: db.id,
            name: db.name,
            username: db.username,
            password_hash: db.password_hash,
            display_name: db.display_name,
            subscription_end: db.subscription_end,
            status: CompanyStatus::parse(&db.status)?,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<Company> for CompanyDb {
    fn from(domain: Company) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            username: domain.username,
            password_hash: domain.password_hash,
            display_name: domain.display_name,
            subscription_end: domain.subscription_end,
            status: domain.status.as_str().to_string(),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
