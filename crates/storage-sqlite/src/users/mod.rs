//! SQLite storage implementation for users.

mod model;
mod repository;

pub use model::UserDb;
pub use repository::UserRepository;
