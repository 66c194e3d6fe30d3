//! Users module - user models, credential handling, services, and traits.

mod users_model;
mod users_service;
mod users_traits;

pub mod password;

pub use users_model::{NewUser, User, UserRole};
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
