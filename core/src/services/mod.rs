//! Business services containing domain logic and use cases.

pub mod auth;
pub mod guard;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use auth::AuthService;
pub use guard::{extract_bearer_token, AuthGuard, Authenticator, RoleGuard, BEARER_PREFIX};
pub use token::{TokenService, TokenServiceConfig};
pub use user::UserService;
