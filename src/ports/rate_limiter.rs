//! Rate limiting port for tool invocations.
//!
//! Counts calls per (session, tool) pair inside a fixed window. The limiter
//! is advisory: it deters abuse of side-effecting tools but is not a
//! security boundary.

use async_trait::async_trait;

use crate::domain::foundation::SessionId;

/// Port for per-session tool rate limiting.
///
/// Implementations must be safe to call concurrently. `check` both counts
/// the call and reports whether it may proceed.
#[async_trait]
pub trait ToolRateLimiter: Send + Sync {
    /// Record one call for the key and report whether it is within quota.
    async fn check(&self, key: &RateLimitKey) -> Result<RateLimitResult, RateLimitError>;
}

/// Key identifying one rate counter.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct RateLimitKey {
    pub session: SessionId,
    pub tool: String,
}

impl RateLimitKey {
    pub fn new(session: SessionId, tool: impl Into<String>) -> Self {
        Self {
            session,
            tool: tool.into(),
        }
    }

    /// Returns the store key for this counter.
    pub fn to_store_key(&self) -> String {
        format!("tool:rate:{}:{}", self.session, self.tool)
    }
}

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitResult {
    /// Call is allowed; `count` includes this call.
    Allowed { count: u64, limit: u32 },
    /// Call exceeded the quota for the current window.
    Denied(RateLimitDenied),
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed { .. })
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, RateLimitResult::Denied(_))
    }
}

/// Details of a rate limit denial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitDenied {
    /// Maximum calls allowed in the window.
    pub limit: u32,
    /// Counter value after this call.
    pub count: u64,
    /// Window length in seconds.
    pub window_secs: u64,
}

impl RateLimitDenied {
    /// Window length rounded up to whole minutes, never below one.
    pub fn window_minutes(&self) -> u64 {
        (self.window_secs.saturating_add(59) / 60).max(1)
    }

    /// Advisory text returned to the user instead of the tool result.
    pub fn cooldown_message(&self) -> String {
        format!(
            "Too many requests. Please try again in {} minute(s).",
            self.window_minutes()
        )
    }
}

/// Errors that can occur during rate limiting operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RateLimitError {
    /// Counter backend is unavailable.
    #[error("rate limiter unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> RateLimitKey {
        RateLimitKey::new(SessionId::new("s-1").unwrap(), "queryOrder")
    }

    #[test]
    fn store_key_combines_session_and_tool() {
        assert_eq!(key().to_store_key(), "tool:rate:s-1:queryOrder");
    }

    #[test]
    fn different_tools_produce_different_keys() {
        let other = RateLimitKey::new(SessionId::new("s-1").unwrap(), "otherTool");
        assert_ne!(key().to_store_key(), other.to_store_key());
    }

    #[test]
    fn cooldown_message_names_window_in_minutes() {
        let denied = RateLimitDenied {
            limit: 5,
            count: 6,
            window_secs: 60,
        };
        assert_eq!(
            denied.cooldown_message(),
            "Too many requests. Please try again in 1 minute(s)."
        );
    }

    #[test]
    fn window_minutes_rounds_up_partial_minutes() {
        let denied = RateLimitDenied {
            limit: 5,
            count: 6,
            window_secs: 90,
        };
        assert_eq!(denied.window_minutes(), 2);
    }

    #[test]
    fn result_predicates_work() {
        assert!(RateLimitResult::Allowed { count: 1, limit: 5 }.is_allowed());
        let denied = RateLimitResult::Denied(RateLimitDenied {
            limit: 5,
            count: 6,
            window_secs: 60,
        });
        assert!(denied.is_denied());
        assert!(!denied.is_allowed());
    }
}
