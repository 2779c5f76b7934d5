//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the AuthGate backend.
//! It provides the concrete adapters behind the core repository traits.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: PostgreSQL `UserRepository` using SQLx
//! - **Cache**: Redis client backing the token `RevocationStore`
//!
//! ## Features
//!
//! - `postgres`: Enable PostgreSQL database support (default)
//! - `redis-cache`: Enable Redis caching support (default)

use ag_core::errors::DomainError;

/// Database module - PostgreSQL implementations using SQLx
#[cfg(feature = "postgres")]
pub mod database;

/// Cache module - Redis client and operations
pub mod cache;

/// Configuration module for infrastructure services
pub mod config {
    pub use ag_shared::config::{CacheConfig, DatabaseConfig};
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Operation exceeded its response timeout
    #[error("Operation timed out after {0}ms")]
    Timeout(u64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Database(e) => DomainError::Database(e.to_string()),
            InfrastructureError::Cache(e) => DomainError::Cache(e.to_string()),
            InfrastructureError::Timeout(ms) => {
                DomainError::Cache(format!("operation timed out after {}ms", ms))
            }
            InfrastructureError::Config(message) => DomainError::Internal { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_maps_to_cache_error() {
        let error: DomainError = InfrastructureError::Timeout(2000).into();
        assert!(matches!(error, DomainError::Cache(ref msg) if msg.contains("2000ms")));
    }

    #[test]
    fn test_config_maps_to_internal_error() {
        let error: DomainError = InfrastructureError::Config("bad url".into()).into();
        assert!(matches!(error, DomainError::Internal { .. }));
    }
}
