//! Merchants module - merchant balances, audit entries, services, and traits.

mod merchants_model;
mod merchants_service;
mod merchants_traits;

pub use merchants_model::{
    Merchant, MerchantEntry, MerchantEntryType, MerchantUpdate, NewMerchant, NewMerchantEntry,
};
pub use merchants_service::MerchantService;
pub use merchants_traits::{MerchantRepositoryTrait, MerchantServiceTrait};
