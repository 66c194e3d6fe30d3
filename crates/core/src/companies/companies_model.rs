use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Lifecycle state of a tenant.
///
/// Replaces the active-flag / hard-delete duality: suspension is reversible,
/// purging is scheduled explicitly and then cascades through every dependent
/// row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CompanyStatus {
    #[default]
    Active,
    Suspended,
    PurgeScheduled,
}

impl CompanyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyStatus::Active => "active",
            CompanyStatus::Suspended => "suspended",
            CompanyStatus::PurgeScheduled => "purge_scheduled",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(CompanyStatus::Active),
            "suspended" => Ok(CompanyStatus::Suspended),
            "purge_scheduled" => Ok(CompanyStatus::PurgeScheduled),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown company status '{}'",
                other
            )))),
        }
    }
}

/// Domain model representing a tenant (an exchange shop).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: Option<String>,
    pub subscription_end: Option<NaiveDateTime>,
    pub status: CompanyStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Company {
    pub fn is_active(&self) -> bool {
        self.status == CompanyStatus::Active
    }
}

/// Input model for creating a new tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub name: String,
    pub username: String,
    pub password: String,
    pub display_name: Option<String>,
    pub subscription_end: Option<NaiveDateTime>,
}

impl NewCompany {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if self.username.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "username".to_string(),
            )));
        }
        if self.password.len() < crate::constants::MIN_PASSWORD_LENGTH {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Password must be at least {} characters",
                crate::constants::MIN_PASSWORD_LENGTH
            ))));
        }
        Ok(())
    }
}
