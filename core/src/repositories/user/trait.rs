//! User repository trait defining the interface for user data persistence.
//!
//! The trait is async-first and keeps the domain layer independent of the
//! database driver that backs it.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use ag_core::repositories::UserRepository;
/// use ag_core::domain::entities::user::User;
/// use ag_core::errors::DomainError;
///
/// struct PgUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for PgUserRepository {
///     async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn find_by_id(&self, _id: i64) -> Result<Option<User>, DomainError> { Ok(None) }
/// #   async fn find_all(&self) -> Result<Vec<User>, DomainError> { Ok(vec![]) }
/// #   async fn create(&self, user: User) -> Result<User, DomainError> { Ok(user) }
/// #   async fn delete(&self, _id: i64) -> Result<bool, DomainError> { Ok(false) }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email, including the password hash
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user registered with this email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by identifier
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;

    /// List every user ordered by identifier
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user with its generated `id` and timestamps
    /// * `Err(DomainError::Conflict)` - The email is already registered
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Delete a user
    ///
    /// # Returns
    /// * `Ok(true)` - User was deleted
    /// * `Ok(false)` - User not found
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;

    /// Check if a user exists with the given email
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    /// Check that the backing database answers
    async fn ping(&self) -> Result<bool, DomainError> {
        Ok(true)
    }
}

#[async_trait]
impl<T: UserRepository + ?Sized> UserRepository for Arc<T> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        (**self).find_by_email(email).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        (**self).find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        (**self).find_all().await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        (**self).create(user).await
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        (**self).delete(id).await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        (**self).exists_by_email(email).await
    }

    async fn ping(&self) -> Result<bool, DomainError> {
        (**self).ping().await
    }
}
