//! SQLite storage implementation for companies.

mod model;
mod repository;

pub use model::CompanyDb;
pub use repository::CompanyRepository;
