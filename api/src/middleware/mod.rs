pub mod auth;
pub mod cors;

pub use auth::{AuthContext, CurrentUser, JwtAuth};
pub use cors::create_cors;
