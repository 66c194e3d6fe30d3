//! User repository and service traits.

use async_trait::async_trait;

use super::users_model::{NewUser, User};
use crate::errors::Result;
use crate::treasuries::Treasury;

/// Contract for user persistence.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Inserts the user and, for employees, their personal treasury as one
    /// unit.
    async fn create(&self, user: User, treasury: Option<Treasury>) -> Result<User>;

    fn get_by_id(&self, user_id: &str) -> Result<User>;

    /// Case-insensitive lookup among active users.
    fn find_active_by_username(&self, username: &str) -> Result<Option<User>>;

    fn list(&self, company_id: &str, is_active_filter: Option<bool>) -> Result<Vec<User>>;

    async fn set_active(&self, user_id: &str, is_active: bool) -> Result<()>;
}

/// Contract for user management operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Creates a user; employees get a personal treasury in the same step.
    async fn create_user(&self, new_user: NewUser) -> Result<User>;

    /// Checks a username/password pair and returns the matching active user.
    fn verify_credentials(&self, username: &str, password: &str) -> Result<User>;

    fn get_user(&self, user_id: &str) -> Result<User>;

    fn list_users(&self, company_id: &str, is_active_filter: Option<bool>) -> Result<Vec<User>>;

    async fn deactivate_user(&self, user_id: &str) -> Result<()>;
}
