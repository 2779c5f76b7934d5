//! Shared fixtures for the API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;

use ag_api::AppState;
use ag_core::domain::entities::user::{Role, User};
use ag_core::repositories::{MockRevocationStore, MockUserRepository, UserRepository};
use ag_core::services::guard::AuthGuard;
use ag_core::services::token::{TokenService, TokenServiceConfig};

/// Low bcrypt cost keeps the suite fast
pub const TEST_BCRYPT_COST: u32 = 4;

pub const PASSWORD: &str = "correct-horse";

pub type TestState = AppState<MockUserRepository, MockRevocationStore>;

pub struct TestContext {
    pub users: Arc<MockUserRepository>,
    pub store: MockRevocationStore,
    pub tokens: Arc<TokenService<MockRevocationStore>>,
    pub state: web::Data<TestState>,
    pub guard: web::Data<AuthGuard>,
}

impl TestContext {
    pub fn new() -> Self {
        let users = Arc::new(MockUserRepository::new());
        let store = MockRevocationStore::new();
        let tokens = Arc::new(
            TokenService::new(store.clone(), TokenServiceConfig::default())
                .expect("default token config is valid"),
        );

        let state = web::Data::new(AppState::new(
            Arc::clone(&users),
            Arc::clone(&tokens),
            TEST_BCRYPT_COST,
        )
        .expect("test bcrypt cost is valid"));
        let guard = web::Data::new(AuthGuard::new(tokens.clone()));

        Self {
            users,
            store,
            tokens,
            state,
            guard,
        }
    }

    /// Inserts a user whose password is [`PASSWORD`]
    pub async fn seed_user(&self, email: &str, username: &str, role: Role) -> User {
        let hash = bcrypt::hash(PASSWORD, TEST_BCRYPT_COST).expect("hashing succeeds");
        self.users
            .create(User::new(email, username, hash, role))
            .await
            .expect("seed user is unique")
    }

    /// Mints a token for `user` directly, bypassing login
    pub fn token_for(&self, user: &User) -> String {
        self.tokens
            .generate(&user.into())
            .expect("token generation succeeds")
    }
}

pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (
        actix_web::http::header::AUTHORIZATION,
        format!("Bearer {}", token),
    )
}
