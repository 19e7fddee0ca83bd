//! Fixed-window counter rate limiter over a key-value store.
//!
//! 1. INCR the counter key for (session, tool)
//! 2. If the count is 1, EXPIRE the key after the window
//! 3. If the count exceeds the limit, deny
//!
//! Steps 1 and 2 are separate operations. Concurrent first calls can
//! stretch a window slightly; the counter never drops to zero while the
//! key is live, so the limit still holds within a window.

use async_trait::async_trait;
use std::sync::Arc;

use crate::ports::{
    KeyValueStore, RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult,
    ToolRateLimiter,
};

use super::config::ToolRateLimitConfig;

/// Counter-based limiter. Works with any `KeyValueStore`.
#[derive(Clone)]
pub struct CounterRateLimiter {
    store: Arc<dyn KeyValueStore>,
    config: ToolRateLimitConfig,
}

impl CounterRateLimiter {
    pub fn new(store: Arc<dyn KeyValueStore>, config: ToolRateLimitConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &ToolRateLimitConfig {
        &self.config
    }
}

#[async_trait]
impl ToolRateLimiter for CounterRateLimiter {
    async fn check(&self, key: &RateLimitKey) -> Result<RateLimitResult, RateLimitError> {
        let store_key = key.to_store_key();
        let limits = self.config.limits_for(&key.tool);

        let count = self
            .store
            .increment(&store_key)
            .await
            .map_err(|e| RateLimitError::Unavailable(e.to_string()))?;

        if count == 1 {
            self.store
                .expire(&store_key, limits.window())
                .await
                .map_err(|e| RateLimitError::Unavailable(e.to_string()))?;
        }

        if count > u64::from(limits.max_calls) {
            return Ok(RateLimitResult::Denied(RateLimitDenied {
                limit: limits.max_calls,
                count,
                window_secs: limits.window_secs,
            }));
        }

        Ok(RateLimitResult::Allowed {
            count,
            limit: limits.max_calls,
        })
    }
}

impl std::fmt::Debug for CounterRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CounterRateLimiter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
