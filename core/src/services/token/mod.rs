//! Token service module for JWT management
//!
//! This module handles the session token lifecycle:
//! - HMAC-signed JWT generation and verification
//! - Revocation through markers in a key-value store
//! - Token refresh (mint new, revoke old)

mod config;
mod service;


pub use config::{TokenServiceConfig, MAX_TOKEN_TTL_SECONDS};
pub use service::TokenService;
