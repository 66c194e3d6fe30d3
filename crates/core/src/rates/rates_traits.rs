//! Rate repository and service traits.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::rates_model::{ExchangeRateSettings, RateQuote, RateSettingsUpdate};
use crate::currency::ExchangeDirection;
use crate::errors::Result;

/// Contract for rate settings persistence.
#[async_trait]
pub trait RateRepositoryTrait: Send + Sync {
    fn find_for_company(&self, company_id: &str) -> Result<Option<ExchangeRateSettings>>;

    async fn upsert(&self, update: RateSettingsUpdate) -> Result<ExchangeRateSettings>;
}

/// Contract for rate resolution and configuration.
#[async_trait]
pub trait RateServiceTrait: Send + Sync {
    /// Resolves the rate for an exchange of `amount` in the source currency,
    /// deciding retail vs. wholesale. Pure over the current snapshot.
    fn resolve(
        &self,
        company_id: &str,
        direction: ExchangeDirection,
        amount: Decimal,
    ) -> Result<RateQuote>;

    /// Commission charged on an e-wallet transfer of `amount`.
    fn wallet_commission(&self, company_id: &str, amount: Decimal) -> Result<Decimal>;

    fn get_settings(&self, company_id: &str) -> Result<ExchangeRateSettings>;

    async fn update_settings(&self, update: RateSettingsUpdate) -> Result<ExchangeRateSettings>;
}
