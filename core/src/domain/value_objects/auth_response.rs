//! Authentication response value objects for API responses.

use serde::{Deserialize, Serialize};

use crate::domain::entities::user::{User, UserSummary};

/// Returned after a successful login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Signed session token
    pub token: String,

    /// The authenticated user
    pub user: UserSummary,

    /// Token lifetime in seconds
    pub expires_in: i64,
}

impl LoginResponse {
    /// Creates a login response for `user`
    pub fn new(token: String, user: &User, expires_in: i64) -> Self {
        Self {
            token,
            user: user.summary(),
            expires_in,
        }
    }
}

/// Returned after logout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogoutResponse {
    pub message: String,
}

impl Default for LogoutResponse {
    fn default() -> Self {
        Self {
            message: "Logged out successfully".to_string(),
        }
    }
}

/// Returned after exchanging a token for a fresh one
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub token: String,
    pub expires_in: i64,
}
