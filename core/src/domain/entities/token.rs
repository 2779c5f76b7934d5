//! Session token claims and the identity resolved from them.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use super::user::{Role, User};

/// Key namespace for revocation markers
pub const REVOCATION_KEY_PREFIX: &str = "auth:revoked:";

/// Value stored under every revocation marker
pub const REVOCATION_MARKER_VALUE: &str = "1";

/// Builds the revocation-store key for a raw token string
pub fn revocation_key(token: &str) -> String {
    format!("{}{}", REVOCATION_KEY_PREFIX, token)
}

/// Shortens a token for log output
pub fn token_preview(token: &str) -> String {
    let head: String = token.chars().take(10).collect();
    format!("{}...", head)
}

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID as a string)
    pub sub: String,

    /// User ID
    #[serde(rename = "userId")]
    pub user_id: i64,

    /// Email address
    pub email: String,

    /// Display name
    pub username: String,

    /// Authorization role
    pub role: Role,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates claims for an identity valid for `ttl_seconds` from now
    pub fn for_identity(identity: &AuthUser, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(ttl_seconds);

        Self {
            sub: identity.user_id.to_string(),
            user_id: identity.user_id,
            email: identity.email.clone(),
            username: identity.username.clone(),
            role: identity.role,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        }
    }

    /// Seconds until expiry; zero or negative once expired
    pub fn remaining_seconds(&self) -> i64 {
        self.exp - Utc::now().timestamp()
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        self.remaining_seconds() <= 0
    }

    /// The identity these claims describe
    pub fn identity(&self) -> AuthUser {
        AuthUser {
            user_id: self.user_id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Authenticated principal attached to a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    /// Whether the principal's role is a member of `allowed`
    ///
    /// An empty allow-set admits every role.
    pub fn has_any_role(&self, allowed: &[Role]) -> bool {
        allowed.is_empty() || allowed.contains(&self.role)
    }
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> AuthUser {
        AuthUser {
            user_id: 7,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            role: Role::User,
        }
    }

    #[test]
    fn test_claims_for_identity() {
        let claims = Claims::for_identity(&alice(), 86400);

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.exp - claims.iat, 86400);
        assert!(!claims.is_expired());
        assert_eq!(claims.identity(), alice());
    }

    #[test]
    fn test_claims_expiration() {
        let mut claims = Claims::for_identity(&alice(), 60);
        claims.exp = Utc::now().timestamp() - 1;

        assert!(claims.is_expired());
        assert!(claims.remaining_seconds() < 0);
    }

    #[test]
    fn test_claims_wire_shape() {
        let claims = Claims::for_identity(&alice(), 60);
        let json = serde_json::to_value(&claims).unwrap();

        for field in ["sub", "userId", "email", "username", "role", "iat", "exp"] {
            assert!(json.get(field).is_some(), "missing claim {}", field);
        }
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn test_role_membership() {
        let user = alice();
        assert!(user.has_any_role(&[]));
        assert!(user.has_any_role(&[Role::Admin, Role::User]));
        assert!(!user.has_any_role(&[Role::Admin]));
    }

    #[test]
    fn test_revocation_key_and_preview() {
        assert_eq!(revocation_key("abc.def"), "auth:revoked:abc.def");
        assert_eq!(token_preview("eyJhbGciOiJIUzI1NiJ9.payload"), "eyJhbGciOi...");
        assert_eq!(token_preview("short"), "short...");
    }
}
