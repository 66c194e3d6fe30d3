use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use super::rates_model::{ExchangeRateSettings, RateQuote, RateSettingsUpdate};
use super::rates_traits::{RateRepositoryTrait, RateServiceTrait};
use crate::constants::DECIMAL_PRECISION;
use crate::currency::ExchangeDirection;
use crate::errors::{Error, Result, ValidationError};

/// Service resolving exchange rates and the wholesale tier.
pub struct RateService {
    repository: Arc<dyn RateRepositoryTrait>,
}

impl RateService {
    pub fn new(repository: Arc<dyn RateRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// A freshly seeded tenant has a settings row full of zeros; a zero rate
    /// is treated as not configured rather than divided by.
    fn configured(&self, company_id: &str, rate: Decimal) -> Result<Decimal> {
        if rate <= Decimal::ZERO {
            return Err(Error::RateNotConfigured(company_id.to_string()));
        }
        Ok(rate)
    }
}

#[async_trait::async_trait]
impl RateServiceTrait for RateService {
    fn resolve(
        &self,
        company_id: &str,
        direction: ExchangeDirection,
        amount: Decimal,
    ) -> Result<RateQuote> {
        if amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::NonPositiveAmount(
                amount,
            )));
        }

        let settings = self.get_settings(company_id)?;

        let quote = match direction {
            ExchangeDirection::SdgToEgp => {
                let retail_rate = self.configured(company_id, settings.sd_to_eg_rate)?;
                let retail_amount = amount / retail_rate;

                // Wholesale kicks in once the payout crosses the threshold,
                // recomputing the whole amount at the preferential rate.
                if settings.wholesale_threshold > Decimal::ZERO
                    && settings.wholesale_rate > Decimal::ZERO
                    && retail_amount >= settings.wholesale_threshold
                {
                    RateQuote {
                        rate: settings.wholesale_rate,
                        converted_amount: (amount / settings.wholesale_rate)
                            .round_dp(DECIMAL_PRECISION),
                        is_wholesale: true,
                    }
                } else {
                    RateQuote {
                        rate: retail_rate,
                        converted_amount: retail_amount.round_dp(DECIMAL_PRECISION),
                        is_wholesale: false,
                    }
                }
            }
            // Wholesale never applies in this direction.
            ExchangeDirection::EgpToSdg => {
                let rate = self.configured(company_id, settings.eg_to_sd_rate)?;
                RateQuote {
                    rate,
                    converted_amount: (amount * rate).round_dp(DECIMAL_PRECISION),
                    is_wholesale: false,
                }
            }
        };

        debug!(
            "Resolved {:?} for company {}: rate={} converted={} wholesale={}",
            direction, company_id, quote.rate, quote.converted_amount, quote.is_wholesale
        );
        Ok(quote)
    }

    fn wallet_commission(&self, company_id: &str, amount: Decimal) -> Result<Decimal> {
        if amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::NonPositiveAmount(
                amount,
            )));
        }
        let settings = self.get_settings(company_id)?;
        Ok((amount * settings.ewallet_commission / dec!(100)).round_dp(DECIMAL_PRECISION))
    }

    fn get_settings(&self, company_id: &str) -> Result<ExchangeRateSettings> {
        self.repository
            .find_for_company(company_id)?
            .ok_or_else(|| Error::RateNotConfigured(company_id.to_string()))
    }

    async fn update_settings(&self, update: RateSettingsUpdate) -> Result<ExchangeRateSettings> {
        update.validate()?;
        self.repository.upsert(update).await
    }
}
