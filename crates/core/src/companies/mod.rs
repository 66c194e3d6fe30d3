//! Companies module - tenant lifecycle models, services, and traits.

mod companies_model;
mod companies_service;
mod companies_traits;

pub use companies_model::{Company, CompanyStatus, NewCompany};
pub use companies_service::CompanyService;
pub use companies_traits::{CompanyRepositoryTrait, CompanyServiceTrait};
