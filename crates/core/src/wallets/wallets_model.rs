use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Domain model representing an employee's e-wallet float.
///
/// Single currency: e-wallet float is held in EGP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EWallet {
    pub id: String,
    pub company_id: String,
    pub employee_id: String,
    pub phone_number: String,
    pub provider: String,
    pub balance: Decimal,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for registering an e-wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEWallet {
    pub company_id: String,
    pub employee_id: String,
    pub phone_number: String,
    pub provider: String,
}

impl NewEWallet {
    pub fn validate(&self) -> Result<()> {
        if self.company_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "companyId".to_string(),
            )));
        }
        if self.employee_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "employeeId".to_string(),
            )));
        }
        if self.phone_number.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "phoneNumber".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating wallet metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EWalletUpdate {
    pub id: String,
    pub phone_number: String,
    pub provider: String,
    pub is_active: bool,
}

impl EWalletUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        if self.phone_number.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "phoneNumber".to_string(),
            )));
        }
        Ok(())
    }
}
