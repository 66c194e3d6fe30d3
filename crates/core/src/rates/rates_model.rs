use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Per-tenant exchange rate configuration. One row per company.
///
/// Rates follow the "units of source currency per unit of destination"
/// convention for SDG→EGP (conversion divides by the rate); the EGP→SDG
/// rate is a multiplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateSettings {
    pub id: String,
    pub company_id: String,
    pub sd_to_eg_rate: Decimal,
    pub eg_to_sd_rate: Decimal,
    /// Preferential SDG→EGP rate once the converted amount crosses the
    /// threshold.
    pub wholesale_rate: Decimal,
    /// Threshold in EGP (destination currency) above which the wholesale
    /// rate applies.
    pub wholesale_threshold: Decimal,
    /// Commission percentage charged on e-wallet transfers.
    pub ewallet_commission: Decimal,
    pub updated_at: NaiveDateTime,
}

/// Input model for updating a tenant's rate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSettingsUpdate {
    pub company_id: String,
    pub sd_to_eg_rate: Decimal,
    pub eg_to_sd_rate: Decimal,
    pub wholesale_rate: Decimal,
    pub wholesale_threshold: Decimal,
    pub ewallet_commission: Decimal,
}

impl RateSettingsUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.company_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "companyId".to_string(),
            )));
        }
        if self.sd_to_eg_rate <= Decimal::ZERO || self.eg_to_sd_rate <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Exchange rates must be positive".to_string(),
            )));
        }
        if self.wholesale_rate <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Wholesale rate must be positive".to_string(),
            )));
        }
        if self.wholesale_threshold < Decimal::ZERO || self.ewallet_commission < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Threshold and commission cannot be negative".to_string(),
            )));
        }
        Ok(())
    }
}

/// Result of resolving a rate for a concrete exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuote {
    /// The rate actually applied (retail or wholesale).
    pub rate: Decimal,
    /// Amount paid out in the destination currency.
    pub converted_amount: Decimal,
    pub is_wholesale: bool,
}
