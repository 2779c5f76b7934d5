//! Main authentication service implementation

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::entities::token::AuthUser;
use crate::domain::value_objects::{LoginResponse, LogoutResponse};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{RevocationStore, UserRepository};
use crate::services::token::TokenService;

/// Authentication service for password login and logout
pub struct AuthService<U, S>
where
    U: UserRepository,
    S: RevocationStore,
{
    /// User repository for credential lookup
    user_repository: Arc<U>,
    /// Token service for minting and revoking session tokens
    token_service: Arc<TokenService<S>>,
}

impl<U, S> AuthService<U, S>
where
    U: UserRepository,
    S: RevocationStore,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `token_service` - Service for JWT token management
    pub fn new(user_repository: Arc<U>, token_service: Arc<TokenService<S>>) -> Self {
        Self {
            user_repository,
            token_service,
        }
    }

    /// Authenticate with email and password
    ///
    /// # Returns
    ///
    /// * `Ok(LoginResponse)` - Signed token, user summary and token lifetime
    /// * `Err(AuthError::UserNotFound)` - No user registered with `email`
    /// * `Err(AuthError::PasswordMismatch)` - Password does not match the stored hash
    /// * `Err(DomainError)` - Repository or signing failure
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<LoginResponse> {
        let user = match self.user_repository.find_by_email(email).await? {
            Some(user) => user,
            None => {
                warn!(email = %email, "Login attempt for unknown email");
                return Err(AuthError::UserNotFound.into());
            }
        };

        if !verify_password(password, &user.password_hash).await? {
            warn!(user_id = user.id, "Login attempt with wrong password");
            return Err(AuthError::PasswordMismatch.into());
        }

        let token = self.token_service.generate(&AuthUser::from(&user))?;
        info!(user_id = user.id, role = %user.role, "User logged in");

        Ok(LoginResponse::new(
            token,
            &user,
            self.token_service.token_ttl_seconds(),
        ))
    }

    /// Revoke `token`; always succeeds
    pub async fn logout(&self, token: &str) -> LogoutResponse {
        self.token_service.revoke(token).await;
        LogoutResponse::default()
    }
}

/// Checks a password against a bcrypt hash off the async executor
async fn verify_password(password: &str, hash: &str) -> DomainResult<bool> {
    let password = password.to_owned();
    let hash = hash.to_owned();

    let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("password verification task failed: {}", e),
        })?;

    match outcome {
        Ok(matches) => Ok(matches),
        Err(e) => {
            // A corrupt stored hash can never match
            error!(error = %e, "Stored password hash could not be parsed");
            Ok(false)
        }
    }
}
