//! Database model for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use sarraf_core::errors::Error;
use sarraf_core::users::{User, UserRole};

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
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDb {
    pub id: String,
    pub company_id: Option<String>,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<UserDb> for User {
    type Error = Error;

    fn try_from(db: UserDb) -> Result<Self, Error> {
        Ok(Self {
            id: db.id,
            company_id: db.company_id,
            username: db.username,
            password_hash: db.password_hash,
            full_name: db.full_name,
            role: UserRole::parse(&db.role)?,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<User> for UserDb {
    fn from(domain: User) -> Self {
        Self {
            id: domain.id,
            company_id: domain.company_id,
            username: domain.username,
            password_hash: domain.password_hash,
            full_name: domain.full_name,
            role: domain.role.as_str().to_string(),
            is_active: domain.is_active,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
