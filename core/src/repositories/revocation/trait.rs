//! Revocation store trait: a key-value store with per-key expiry.
//!
//! Revocation markers are written under `auth:revoked:<token>` and expire
//! together with the token they describe.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::DomainError;

/// Key-value store holding revocation markers
///
/// Implementations must be safe to share across request handlers. Errors
/// are surfaced as `DomainError::Cache` so callers can decide how to fail.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Read the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Write `value` under `key`, expiring after `ttl_seconds`
    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), DomainError>;

    /// Whether the store is reachable
    async fn ping(&self) -> Result<bool, DomainError> {
        Ok(true)
    }
}

#[async_trait]
impl<T: RevocationStore + ?Sized> RevocationStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        (**self).get(key).await
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), DomainError> {
        (**self).set_with_expiry(key, value, ttl_seconds).await
    }

    async fn ping(&self) -> Result<bool, DomainError> {
        (**self).ping().await
    }
}
