//! HTTP route handlers and the state they share
//!
//! Handlers are generic over the user repository and the revocation store so
//! the same routes run against PostgreSQL/Redis in production and against the
//! in-memory doubles in tests.

pub mod auth;
pub mod examples;
pub mod users;

use std::sync::Arc;

use ag_core::errors::DomainResult;
use ag_core::repositories::{RevocationStore, UserRepository};
use ag_core::services::{AuthService, TokenService, UserService};

/// Services shared by every handler
pub struct AppState<U, S>
where
    U: UserRepository,
    S: RevocationStore,
{
    pub auth_service: Arc<AuthService<U, S>>,
    pub user_service: Arc<UserService<U>>,
    pub token_service: Arc<TokenService<S>>,
}

impl<U, S> AppState<U, S>
where
    U: UserRepository,
    S: RevocationStore,
{
    /// Wires the services around one repository and one token service
    ///
    /// Fails when `bcrypt_cost` is outside the range bcrypt accepts.
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<S>>,
        bcrypt_cost: u32,
    ) -> DomainResult<Self> {
        let user_service = UserService::new(Arc::clone(&user_repository), bcrypt_cost)?;

        Ok(Self {
            auth_service: Arc::new(AuthService::new(
                Arc::clone(&user_repository),
                Arc::clone(&token_service),
            )),
            user_service: Arc::new(user_service),
            token_service,
        })
    }
}
