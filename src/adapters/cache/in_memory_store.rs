//! In-memory key-value store for tests and single-process runs.
//!
//! Expired entries are dropped when their key is read and swept from the
//! whole map on every write. Not shared between processes; use the Redis
//! store when several instances run.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::ports::{KeyValueStore, StoreError};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// In-memory TTL store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| !e.is_expired(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Number of stored entries, expired ones included.
    #[cfg(test)]
    async fn stored(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Remaining time to live of a key, if it exists and has an expiry.
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .get(key)
            .filter(|e| !e.is_expired(now))
            .and_then(|e| e.expires_at)
            .map(|at| at.saturating_duration_since(now))
    }
}

fn sweep_expired(entries: &mut HashMap<String, Entry>, now: Instant) {
    entries.retain(|_, e| !e.is_expired(now));
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        let now = Instant::now();
        let entry = Entry {
            value: value.to_string(),
            expires_at: Some(now + ttl),
        };
        let mut entries = self.entries.write().await;
        sweep_expired(&mut entries, now);
        entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn increment(&self, key: &str) -> Result<u64, StoreError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        sweep_expired(&mut entries, now);

        let current = match entries.get(key) {
            Some(entry) => entry
                .value
                .parse::<u64>()
                .map_err(|_| StoreError::NotAnInteger(key.to_string()))?,
            None => 0,
        };

        let next = current + 1;
        let expires_at = entries.get(key).and_then(|e| e.expires_at);
        entries.insert(
            key.to_string(),
            Entry {
                value: next.to_string(),
                expires_at,
            },
        );
        Ok(next)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        let now = Instant::now();
        if let Some(entry) = self.entries.write().await.get_mut(key) {
            if !entry.is_expired(now) {
                entry.expires_at = Some(now + ttl);
            }
        }
        Ok(())
    }
}
