//! Configuration for the token service

use std::str::FromStr;

use ag_shared::config::auth::{AuthConfig, DEFAULT_JWT_SECRET, DEFAULT_TOKEN_TTL_SECONDS};
use jsonwebtoken::Algorithm;

use crate::errors::TokenError;

/// Longest token lifetime the service accepts (one year)
pub const MAX_TOKEN_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Validity window of every minted token, in seconds
    pub token_ttl_seconds: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            algorithm: Algorithm::HS256,
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        }
    }
}

impl TokenServiceConfig {
    /// Builds the token configuration from the application auth settings
    pub fn from_auth_config(config: &AuthConfig) -> Result<Self, TokenError> {
        let algorithm = Algorithm::from_str(&config.jwt.algorithm).map_err(|_| {
            TokenError::UnsupportedAlgorithm {
                algorithm: config.jwt.algorithm.clone(),
            }
        })?;

        Ok(Self {
            jwt_secret: config.jwt.secret.clone(),
            algorithm,
            token_ttl_seconds: config.jwt.token_ttl_seconds,
        })
    }

    pub fn with_ttl_seconds(mut self, ttl: i64) -> Self {
        self.token_ttl_seconds = ttl;
        self
    }
}
