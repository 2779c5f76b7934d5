//! User management: registration, lookup and removal

use std::sync::Arc;

use tracing::info;

use crate::domain::entities::user::{Role, User, UserProfile};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;

/// Service managing user accounts
pub struct UserService<U: UserRepository> {
    user_repository: Arc<U>,
    bcrypt_cost: u32,
}

/// Cost bounds accepted by bcrypt
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

impl<U: UserRepository> UserService<U> {
    /// Fails when `bcrypt_cost` lies outside 4..=31, which bcrypt would
    /// otherwise only report on the first registration.
    pub fn new(user_repository: Arc<U>, bcrypt_cost: u32) -> DomainResult<Self> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            return Err(DomainError::Validation(ValidationError::OutOfRange {
                field: "BCRYPT_COST".to_string(),
                value: i64::from(bcrypt_cost),
                min: i64::from(MIN_BCRYPT_COST),
                max: i64::from(MAX_BCRYPT_COST),
            }));
        }

        Ok(Self {
            user_repository,
            bcrypt_cost,
        })
    }

    /// Check that the user database answers
    pub async fn ping(&self) -> DomainResult<bool> {
        self.user_repository.ping().await
    }

    /// Register a new user
    ///
    /// The password is stored as a bcrypt hash and the role defaults to
    /// `user`. Fails with `DomainError::Conflict` when the email is taken.
    pub async fn create(
        &self,
        email: &str,
        username: &str,
        password: &str,
        role: Option<Role>,
    ) -> DomainResult<UserProfile> {
        if self.user_repository.exists_by_email(email).await? {
            return Err(DomainError::Conflict {
                message: "User with this email already exists".to_string(),
            });
        }

        let password_hash = hash_password(password, self.bcrypt_cost).await?;
        let user = User::new(email, username, password_hash, role.unwrap_or_default());
        let user = self.user_repository.create(user).await?;

        info!(user_id = user.id, role = %user.role, "User created");
        Ok(user.profile())
    }

    pub async fn find_all(&self) -> DomainResult<Vec<UserProfile>> {
        let users = self.user_repository.find_all().await?;
        Ok(users.iter().map(User::profile).collect())
    }

    /// Fetch one user, failing with `NotFound` when absent
    pub async fn find_one(&self, id: i64) -> DomainResult<UserProfile> {
        self.user_repository
            .find_by_id(id)
            .await?
            .map(|user| user.profile())
            .ok_or_else(|| not_found(id))
    }

    /// Full user row including the password hash
    pub async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        self.user_repository.find_by_email(email).await
    }

    /// Delete a user, failing with `NotFound` when absent
    pub async fn remove(&self, id: i64) -> DomainResult<()> {
        if !self.user_repository.delete(id).await? {
            return Err(not_found(id));
        }
        info!(user_id = id, "User removed");
        Ok(())
    }
}

fn not_found(id: i64) -> DomainError {
    DomainError::NotFound {
        resource: format!("User with ID {}", id),
    }
}

async fn hash_password(password: &str, cost: u32) -> DomainResult<String> {
    let password = password.to_owned();

    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("password hashing task failed: {}", e),
        })?
        .map_err(|e| DomainError::Internal {
            message: format!("password hashing failed: {}", e),
        })
}
