//! SQLite storage implementation for exchange rate settings.

mod model;
mod repository;

pub use model::ExchangeRateDb;
pub use repository::RateRepository;
