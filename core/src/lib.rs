//! # AuthGate Core
//!
//! Core business logic and domain layer for the AuthGate backend.
//! This crate contains domain entities, the token lifecycle and guard
//! services, repository interfaces, and error types that form the
//! foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{AuthUser, Claims, Role, User, UserProfile, UserSummary};
pub use domain::value_objects::{LoginResponse, LogoutResponse, RefreshResponse};
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::{RevocationStore, UserRepository};
pub use services::{
    AuthGuard, AuthService, Authenticator, RoleGuard, TokenService, TokenServiceConfig,
    UserService,
};
