//! Key-Value Store Port - Shared store behind the answer cache and rate counters.
//!
//! Every operation is atomic for a single key. No operation spans several
//! keys, and callers must not rely on ordering between two calls.

use async_trait::async_trait;
use std::time::Duration;

/// Errors that can occur during key-value operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store operation failed: {0}")]
    OperationFailed(String),

    #[error("Value at key is not an integer: {0}")]
    NotAnInteger(String),
}

/// Port for a TTL-aware key-value store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Expired keys read as `None`.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value that expires after `ttl`. Overwrites any previous value.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError>;

    /// Atomically increment an integer counter, creating it at 1 if absent.
    ///
    /// Returns the value after incrementing.
    async fn increment(&self, key: &str) -> Result<u64, StoreError>;

    /// Set the expiry of an existing key. Missing keys are ignored.
    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError>;
}
