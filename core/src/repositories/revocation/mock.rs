//! In-memory implementation of RevocationStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::trait_::RevocationStore;

struct Entry {
    value: String,
    expires_at: Instant,
    ttl_seconds: u64,
}

/// Mock revocation store with expiring entries and outage simulation
#[derive(Clone, Default)]
pub struct MockRevocationStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    gets: Arc<AtomicUsize>,
    sets: Arc<AtomicUsize>,
    unavailable: Arc<AtomicBool>,
}

impl MockRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail, as if the store were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `get` calls served so far
    pub fn get_calls(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    /// Number of `set_with_expiry` calls served so far
    pub fn set_calls(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    /// TTL recorded when `key` was written
    pub async fn ttl_of(&self, key: &str) -> Option<u64> {
        self.entries.read().await.get(key).map(|e| e.ttl_seconds)
    }

    /// Whether a live entry exists under `key`
    pub async fn contains(&self, key: &str) -> bool {
        self.entries
            .read()
            .await
            .get(key)
            .map(|e| e.expires_at > Instant::now())
            .unwrap_or(false)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::Cache("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RevocationStore for MockRevocationStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|e| e.expires_at > Instant::now())
            .map(|e| e.value.clone()))
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), DomainError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
                ttl_seconds,
            },
        );
        Ok(())
    }

    async fn ping(&self) -> Result<bool, DomainError> {
        self.check_available()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = MockRevocationStore::new();
        store.set_with_expiry("auth:revoked:t", "1", 60).await.unwrap();

        assert_eq!(store.get("auth:revoked:t").await.unwrap().as_deref(), Some("1"));
        assert_eq!(store.ttl_of("auth:revoked:t").await, Some(60));
        assert!(store.get("auth:revoked:other").await.unwrap().is_none());
        assert_eq!(store.get_calls(), 2);
        assert_eq!(store.set_calls(), 1);
    }

    #[tokio::test]
    async fn test_zero_ttl_entry_is_not_live() {
        let store = MockRevocationStore::new();
        store.set_with_expiry("k", "1", 0).await.unwrap();

        assert!(!store.contains("k").await);
        assert!(store.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unavailable_store_errors() {
        let store = MockRevocationStore::new();
        store.set_unavailable(true);

        assert!(matches!(store.get("k").await, Err(DomainError::Cache(_))));
        assert!(store.set_with_expiry("k", "1", 10).await.is_err());
        assert!(store.ping().await.is_err());
        assert!(store.is_empty().await);

        store.set_unavailable(false);
        assert!(store.ping().await.unwrap());
    }
}
