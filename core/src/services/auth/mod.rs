//! Authentication service module
//!
//! Password login that mints a session token, and logout that revokes it.

mod service;

#[cfg(test)]
mod tests;

pub use service::AuthService;
