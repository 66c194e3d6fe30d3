use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::MIN_PASSWORD_LENGTH;
use crate::errors::{Error, Result, ValidationError};

/// Role of a platform user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    Employee,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "super_admin",
            UserRole::Admin => "admin",
            UserRole::Employee => "employee",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "super_admin" => Ok(UserRole::SuperAdmin),
            "admin" => Ok(UserRole::Admin),
            "employee" => Ok(UserRole::Employee),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown user role '{}'",
                other
            )))),
        }
    }
}

/// Domain model representing a user.
///
/// `company_id` is `None` only for super admins, which exist outside any
/// tenant. Passwords are stored as Argon2 hashes, never in the clear.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub company_id: Option<String>,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub company_id: Option<String>,
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub role: UserRole,
}

impl NewUser {
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "username".to_string(),
            )));
        }
        if self.full_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "fullName".to_string(),
            )));
        }
        if self.password.len() < MIN_PASSWORD_LENGTH {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            ))));
        }
        if self.role != UserRole::SuperAdmin && self.company_id.is_none() {
            return Err(Error::Validation(ValidationError::MissingField(
                "companyId".to_string(),
            )));
        }
        Ok(())
    }
}
