use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use ag_core::domain::entities::user::Role;

/// Body of the user creation endpoints
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(min = 6))]
    pub password: String,

    /// One of `user`, `admin` or `editor`; defaults to `user`
    #[validate(custom(function = "validate_role"))]
    pub role: Option<String>,
}

impl CreateUserRequest {
    /// The requested role, if any
    ///
    /// Only meaningful after [`Validate::validate`] succeeded.
    pub fn parsed_role(&self) -> Option<Role> {
        self.role.as_deref().and_then(|role| role.parse().ok())
    }
}

fn validate_role(role: &str) -> Result<(), ValidationError> {
    role.parse::<Role>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("role"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(role: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            email: "dave@example.com".to_string(),
            username: "dave".to_string(),
            password: "hunter22".to_string(),
            role: role.map(str::to_string),
        }
    }

    #[test]
    fn test_role_is_optional() {
        let req = request(None);
        assert!(req.validate().is_ok());
        assert_eq!(req.parsed_role(), None);
    }

    #[test]
    fn test_known_roles_are_accepted() {
        for (raw, role) in [("user", Role::User), ("admin", Role::Admin), ("editor", Role::Editor)] {
            let req = request(Some(raw));
            assert!(req.validate().is_ok());
            assert_eq!(req.parsed_role(), Some(role));
        }
    }

    #[test]
    fn test_unknown_role_and_short_password_rejected() {
        let mut req = request(Some("root"));
        req.password = "12345".to_string();
        req.username = String::new();

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("role"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("username"));
    }
}
