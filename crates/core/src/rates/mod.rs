//! Rates module - exchange rate settings, the rate resolver, and traits.

mod rates_model;
mod rates_service;
mod rates_traits;

pub use rates_model::{ExchangeRateSettings, RateQuote, RateSettingsUpdate};
pub use rates_service::RateService;
pub use rates_traits::{RateRepositoryTrait, RateServiceTrait};
