//! Cache module for Redis-based storage
//!
//! Provides the Redis client with retry logic and response timeouts, used
//! as the revocation store for session tokens.

pub mod redis_client;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;

// Re-export commonly used types
pub use ag_shared::config::CacheConfig;
