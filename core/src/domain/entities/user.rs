//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Role attached to a user and carried in every session token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular account
    #[default]
    User,
    /// Administrator with access to user management
    Admin,
    /// Content editor
    Editor,
}

impl Role {
    /// Wire representation of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Editor => "editor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            other => Err(ValidationError::UnknownRole {
                role: other.to_string(),
            }),
        }
    }
}

/// User entity as persisted in the `users` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Database-generated identifier (0 until persisted)
    pub id: i64,

    /// Unique email address used to log in
    pub email: String,

    /// Display name
    pub username: String,

    /// bcrypt hash of the password; never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Authorization role
    pub role: Role,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new, not yet persisted user
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            email: email.into(),
            username: username.into(),
            password_hash: password_hash.into(),
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the user holds the given role
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// The compact form returned alongside a login token
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
            role: self.role,
        }
    }

    /// The public profile without the password hash
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// User fields returned with a login token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub role: Role,
}

/// Public user profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_creation() {
        let user = User::new("alice@example.com", "alice", "$2b$hash", Role::User);

        assert_eq!(user.id, 0);
        assert_eq!(user.email, "alice@example.com");
        assert!(user.has_role(Role::User));
        assert!(!user.has_role(Role::Admin));
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = User::new("alice@example.com", "alice", "$2b$secret", Role::Admin);
        let json = serde_json::to_string(&user).unwrap();

        assert!(!json.contains("secret"));
        assert!(!json.contains("password_hash"));
    }

    #[test]
    fn test_role_parsing_and_serialization() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("editor".parse::<Role>().unwrap(), Role::Editor);
        assert!(matches!(
            "root".parse::<Role>(),
            Err(ValidationError::UnknownRole { .. })
        ));

        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn test_profile_uses_camel_case() {
        let user = User::new("bob@example.com", "bob", "hash", Role::Editor);
        let json = serde_json::to_value(user.profile()).unwrap();

        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["role"], "editor");
    }
}
