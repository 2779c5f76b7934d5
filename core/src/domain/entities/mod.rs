//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{
    revocation_key, token_preview, AuthUser, Claims, REVOCATION_KEY_PREFIX,
    REVOCATION_MARKER_VALUE,
};
pub use user::{Role, User, UserProfile, UserSummary};
