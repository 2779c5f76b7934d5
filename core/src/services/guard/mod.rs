//! Request guards: bearer-credential authentication and role authorization.
//!
//! The guards are transport-agnostic; the HTTP middleware feeds them the raw
//! `Authorization` header value and maps their decision to a response.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::token::AuthUser;
use crate::domain::entities::user::Role;
use crate::errors::AuthError;
use crate::repositories::RevocationStore;
use crate::services::token::TokenService;

/// Scheme prefix of an `Authorization` header carrying a session token
pub const BEARER_PREFIX: &str = "Bearer ";

/// Resolves a raw token into the identity it carries
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, token: &str) -> Result<AuthUser, AuthError>;
}

#[async_trait]
impl<S: RevocationStore> Authenticator for TokenService<S> {
    async fn authenticate(&self, token: &str) -> Result<AuthUser, AuthError> {
        TokenService::authenticate(self, token).await
    }
}

/// Extracts the token from an `Authorization` header value
///
/// # Returns
///
/// * `Ok(&str)` - The token following `Bearer `
/// * `Err(AuthError::CredentialMissing)` - No header was sent
/// * `Err(AuthError::CredentialMalformed)` - The header is not a bearer credential
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::CredentialMissing)?;
    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::CredentialMalformed)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::CredentialMalformed);
    }
    Ok(token)
}

/// Admits requests carrying a valid, unrevoked bearer token
#[derive(Clone)]
pub struct AuthGuard {
    authenticator: Arc<dyn Authenticator>,
}

impl AuthGuard {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self { authenticator }
    }

    /// Authenticates the request, returning the identity to attach to it
    ///
    /// Header problems are reported before the authenticator is consulted.
    pub async fn check(&self, header: Option<&str>) -> Result<AuthUser, AuthError> {
        let token = extract_bearer_token(header)?;
        self.authenticator.authenticate(token).await
    }
}

/// Admits authenticated requests whose role is in a declared allow-set
///
/// An empty allow-set admits every authenticated identity.
#[derive(Clone)]
pub struct RoleGuard {
    auth: AuthGuard,
    required: Vec<Role>,
}

impl RoleGuard {
    pub fn new(auth: AuthGuard, required: Vec<Role>) -> Self {
        Self { auth, required }
    }

    pub fn required_roles(&self) -> &[Role] {
        &self.required
    }

    /// Authenticates first; the role check only runs for an authenticated identity
    pub async fn check(&self, header: Option<&str>) -> Result<AuthUser, AuthError> {
        let identity = self.auth.check(header).await?;

        if !identity.has_any_role(&self.required) {
            tracing::debug!(
                user_id = identity.user_id,
                role = %identity.role,
                "Role not permitted for route"
            );
            return Err(AuthError::InsufficientRole);
        }
        Ok(identity)
    }
}
