//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_classification() {
        assert!(AuthError::InsufficientRole.is_forbidden());
        assert!(!AuthError::CredentialRevoked.is_forbidden());
        assert!(AuthError::UserNotFound.is_login_failure());
        assert!(AuthError::PasswordMismatch.is_login_failure());
        assert!(!AuthError::CredentialMissing.is_login_failure());
    }

    #[test]
    fn test_domain_error_bridges() {
        let error: DomainError = AuthError::CredentialExpired.into();
        assert!(matches!(error, DomainError::Auth(AuthError::CredentialExpired)));
        assert_eq!(error.to_string(), "Credential expired");

        let error: DomainError = ValidationError::UnknownRole { role: "root".into() }.into();
        assert_eq!(error.to_string(), "Unknown role: root");
    }
}
