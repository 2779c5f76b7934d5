//! Domain-specific error types for authentication and token operations
//!
//! User-facing messages are configured in the presentation layer for
//! internationalization support; the `Display` strings here are for logs.

use thiserror::Error;

/// Authentication and authorization failures
///
/// Every variant is user-facing and non-fatal. The presentation layer maps
/// the `Credential*` family and the login failures to 401, and
/// `InsufficientRole` to 403.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("No credential presented")]
    CredentialMissing,

    #[error("Credential is not a bearer token")]
    CredentialMalformed,

    #[error("Credential expired")]
    CredentialExpired,

    #[error("Credential revoked")]
    CredentialRevoked,

    #[error("Credential signature or claims invalid")]
    CredentialInvalidSignature,

    #[error("Insufficient role")]
    InsufficientRole,

    #[error("User not found")]
    UserNotFound,

    #[error("Password mismatch")]
    PasswordMismatch,
}

impl AuthError {
    /// Whether this failure is an authorization (403) rather than an
    /// authentication (401) failure
    pub fn is_forbidden(&self) -> bool {
        matches!(self, AuthError::InsufficientRole)
    }

    /// Whether this failure came from a login attempt
    ///
    /// Login failures share a single client-facing message so that a
    /// response never reveals whether an email is registered.
    pub fn is_login_failure(&self) -> bool {
        matches!(self, AuthError::UserNotFound | AuthError::PasswordMismatch)
    }
}

/// Token signing failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token generation failed: {reason}")]
    TokenGenerationFailed { reason: String },

    #[error("Unsupported signing algorithm: {algorithm}")]
    UnsupportedAlgorithm { algorithm: String },

    #[error("Token lifetime out of range: {seconds}s")]
    InvalidTokenTtl { seconds: i64 },
}

/// Input validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Unknown role: {role}")]
    UnknownRole { role: String },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },
}
