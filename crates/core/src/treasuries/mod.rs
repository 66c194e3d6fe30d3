//! Treasuries module - cash pool models, services, and traits.

mod treasuries_model;
mod treasuries_service;
mod treasuries_traits;

pub use treasuries_model::{NewTreasury, Treasury, TreasuryKind};
pub use treasuries_service::TreasuryService;
pub use treasuries_traits::{TreasuryRepositoryTrait, TreasuryServiceTrait};
