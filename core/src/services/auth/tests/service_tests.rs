//! Unit tests for the authentication service

use std::sync::Arc;

use crate::domain::entities::user::{Role, User};
use crate::errors::{AuthError, DomainError};
use crate::repositories::{MockRevocationStore, MockUserRepository, UserRepository};
use crate::services::auth::AuthService;
use crate::services::token::{TokenService, TokenServiceConfig};

const PASSWORD: &str = "correct-horse";

async fn setup() -> (
    AuthService<MockUserRepository, MockRevocationStore>,
    Arc<TokenService<MockRevocationStore>>,
    User,
) {
    let users = Arc::new(MockUserRepository::new());
    let hash = bcrypt::hash(PASSWORD, 4).unwrap();
    let user = users
        .create(User::new("bob@example.com", "bob", hash, Role::Editor))
        .await
        .unwrap();

    let tokens = Arc::new(
        TokenService::new(MockRevocationStore::new(), TokenServiceConfig::default()).unwrap(),
    );

    (AuthService::new(users, tokens.clone()), tokens, user)
}

#[tokio::test]
async fn test_login_success() {
    let (service, tokens, user) = setup().await;

    let response = service.login("bob@example.com", PASSWORD).await.unwrap();

    assert_eq!(response.expires_in, 86400);
    assert_eq!(response.user.id, user.id);
    assert_eq!(response.user.role, Role::Editor);

    let identity = tokens.validate(&response.token).await.unwrap();
    assert_eq!(identity.user_id, user.id);
    assert_eq!(identity.email, "bob@example.com");
}

#[tokio::test]
async fn test_login_unknown_email() {
    let (service, _, _) = setup().await;

    let result = service.login("nobody@example.com", PASSWORD).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (service, tokens, _) = setup().await;

    let result = service.login("bob@example.com", "wrong").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::PasswordMismatch))
    ));
    assert_eq!(tokens.store().get_calls(), 0);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let (service, tokens, _) = setup().await;
    let response = service.login("bob@example.com", PASSWORD).await.unwrap();

    let logout = service.logout(&response.token).await;

    assert_eq!(logout.message, "Logged out successfully");
    assert!(tokens.validate(&response.token).await.is_none());
}

#[tokio::test]
async fn test_logout_always_succeeds() {
    let (service, tokens, _) = setup().await;
    tokens.store().set_unavailable(true);

    let logout = service.logout("not-a-token").await;
    assert_eq!(logout.message, "Logged out successfully");
}

#[tokio::test]
async fn test_corrupt_hash_never_matches() {
    let users = Arc::new(MockUserRepository::new());
    users
        .create(User::new("eve@example.com", "eve", "not-a-bcrypt-hash", Role::User))
        .await
        .unwrap();
    let tokens = Arc::new(
        TokenService::new(MockRevocationStore::new(), TokenServiceConfig::default()).unwrap(),
    );
    let service = AuthService::new(users, tokens);

    let result = service.login("eve@example.com", "anything").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::PasswordMismatch))
    ));
}
