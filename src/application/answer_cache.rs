//! AnswerCache - best-effort cache of knowledge-base answers.
//!
//! Wraps a `KeyValueStore` and stores `RagResponse` values as JSON. The
//! store is never allowed to break an answer: read failures and payloads
//! that no longer decode count as misses, write failures are logged and
//! dropped.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::knowledge::RagResponse;
use crate::ports::KeyValueStore;

/// Cache of `RagResponse` values keyed by cache key.
#[derive(Clone)]
pub struct AnswerCache {
    store: Arc<dyn KeyValueStore>,
}

impl AnswerCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Returns the cached response, or `None` on miss or any failure.
    pub async fn get(&self, key: &str) -> Option<RagResponse> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(cache_key = %key, error = %e, "Answer cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(response) => {
                debug!(cache_key = %key, "Answer cache hit");
                Some(response)
            }
            Err(e) => {
                warn!(cache_key = %key, error = %e, "Cached answer could not be decoded");
                None
            }
        }
    }

    /// Stores a response with the given TTL. Failures are logged only.
    pub async fn put(&self, key: &str, response: &RagResponse, ttl: Duration) {
        let payload = match serde_json::to_string(response) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(cache_key = %key, error = %e, "Answer could not be encoded for cache");
                return;
            }
        };

        if let Err(e) = self.store.set_with_ttl(key, &payload, ttl).await {
            warn!(cache_key = %key, error = %e, "Answer cache write failed");
        }
    }
}

impl std::fmt::Debug for AnswerCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswerCache").finish_non_exhaustive()
    }
}
