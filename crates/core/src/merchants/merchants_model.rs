use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::errors::{Error, Result, ValidationError};

/// Domain model representing a merchant with running balances.
///
/// Balances are signed: a negative balance means the merchant owes the
/// shop, a positive one means the shop owes the merchant. Debits are
/// deliberately unguarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub phone: Option<String>,
    pub egp_balance: Decimal,
    pub sdg_balance: Decimal,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Merchant {
    pub fn balance(&self, currency: Currency) -> Decimal {
        match currency {
            Currency::Egp => self.egp_balance,
            Currency::Sdg => self.sdg_balance,
        }
    }
}

/// Input model for creating a merchant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMerchant {
    pub company_id: String,
    pub name: String,
    pub phone: Option<String>,
}

impl NewMerchant {
    pub fn validate(&self) -> Result<()> {
        if self.company_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "companyId".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating merchant contact data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantUpdate {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub is_active: bool,
}

impl MerchantUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        Ok(())
    }
}

/// Sign of a merchant ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MerchantEntryType {
    Credit,
    Debit,
}

impl MerchantEntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MerchantEntryType::Credit => "credit",
            MerchantEntryType::Debit => "debit",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "credit" => Ok(MerchantEntryType::Credit),
            "debit" => Ok(MerchantEntryType::Debit),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown merchant entry type '{}'",
                other
            )))),
        }
    }

    /// Signed effect on the merchant balance; the stored amount itself is
    /// always positive.
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            MerchantEntryType::Credit => amount,
            MerchantEntryType::Debit => -amount,
        }
    }
}

/// Append-only audit row for a merchant balance movement. Never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantEntry {
    pub id: String,
    pub merchant_id: String,
    pub company_id: String,
    pub entry_type: MerchantEntryType,
    pub currency: Currency,
    pub amount: Decimal,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Input model for a new merchant entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMerchantEntry {
    pub merchant_id: String,
    pub company_id: String,
    pub entry_type: MerchantEntryType,
    pub currency: Currency,
    pub amount: Decimal,
    pub description: Option<String>,
}

impl NewMerchantEntry {
    pub fn validate(&self) -> Result<()> {
        if self.merchant_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "merchantId".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::NonPositiveAmount(
                self.amount,
            )));
        }
        Ok(())
    }
}
