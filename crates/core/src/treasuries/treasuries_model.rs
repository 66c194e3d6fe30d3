use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::errors::{Error, Result, ValidationError};

/// Discriminant for treasury ownership.
///
/// An explicit kind rather than "absent employee id means main": exactly one
/// main treasury exists per active tenant, and employee treasuries always
/// reference their owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreasuryKind {
    Main,
    Employee,
}

impl TreasuryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreasuryKind::Main => "main",
            TreasuryKind::Employee => "employee",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "main" => Ok(TreasuryKind::Main),
            "employee" => Ok(TreasuryKind::Employee),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown treasury kind '{}'",
                other
            )))),
        }
    }
}

/// Domain model representing a cash treasury holding both currencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treasury {
    pub id: String,
    pub company_id: String,
    pub kind: TreasuryKind,
    pub employee_id: Option<String>,
    pub egp_balance: Decimal,
    pub sdg_balance: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Treasury {
    pub fn balance(&self, currency: Currency) -> Decimal {
        match currency {
            Currency::Egp => self.egp_balance,
            Currency::Sdg => self.sdg_balance,
        }
    }
}

/// Input model for creating a treasury.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTreasury {
    pub company_id: String,
    pub kind: TreasuryKind,
    pub employee_id: Option<String>,
}

impl NewTreasury {
    pub fn validate(&self) -> Result<()> {
        if self.company_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "companyId".to_string(),
            )));
        }
        match (self.kind, self.employee_id.as_deref()) {
            (TreasuryKind::Employee, None) => Err(Error::Validation(
                ValidationError::MissingField("employeeId".to_string()),
            )),
            (TreasuryKind::Main, Some(_)) => Err(Error::Validation(
                ValidationError::InvalidInput("Main treasury cannot have an employee".to_string()),
            )),
            _ => Ok(()),
        }
    }
}
