//! Request bodies accepted by the HTTP API

pub mod auth;
pub mod user;

pub use auth::LoginRequest;
pub use user::CreateUserRequest;
