use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::password;
use super::users_model::{NewUser, User, UserRole};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::treasuries::{Treasury, TreasuryKind};

/// Service for managing users.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;

        // Usernames must be unique among active users, case-insensitively.
        if self
            .repository
            .find_active_by_username(&new_user.username)?
            .is_some()
        {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Username '{}' is already taken",
                new_user.username
            ))));
        }

        let now = Utc::now().naive_utc();
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            company_id: new_user.company_id,
            username: new_user.username,
            password_hash: password::hash_password(&new_user.password)?,
            full_name: new_user.full_name,
            role: new_user.role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        // Employees carry their own cash float from day one.
        let treasury = if user.role == UserRole::Employee {
            let company_id = user.company_id.clone().ok_or_else(|| {
                Error::Validation(ValidationError::MissingField("companyId".to_string()))
            })?;
            Some(Treasury {
                id: uuid::Uuid::new_v4().to_string(),
                company_id,
                kind: TreasuryKind::Employee,
                employee_id: Some(user.id.clone()),
                egp_balance: Decimal::ZERO,
                sdg_balance: Decimal::ZERO,
                created_at: now,
                updated_at: now,
            })
        } else {
            None
        };

        debug!(
            "Creating {} user '{}'{}",
            user.role.as_str(),
            user.username,
            if treasury.is_some() {
                " with personal treasury"
            } else {
                ""
            }
        );
        self.repository.create(user, treasury).await
    }

    fn verify_credentials(&self, username: &str, password_input: &str) -> Result<User> {
        let user = self
            .repository
            .find_active_by_username(username)?
            .ok_or_else(|| Error::NotFound(format!("No active user '{}'", username)))?;

        if password::verify_password(password_input, &user.password_hash)? {
            Ok(user)
        } else {
            Err(Error::Validation(ValidationError::InvalidInput(
                "Invalid credentials".to_string(),
            )))
        }
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository.get_by_id(user_id)
    }

    fn list_users(&self, company_id: &str, is_active_filter: Option<bool>) -> Result<Vec<User>> {
        self.repository.list(company_id, is_active_filter)
    }

    async fn deactivate_user(&self, user_id: &str) -> Result<()> {
        // Deactivation keeps the user's treasury in place; remaining float
        // stays attributed to them until withdrawn back to the main treasury.
        self.repository.set_active(user_id, false).await
    }
}
