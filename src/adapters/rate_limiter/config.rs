//! Rate limit configuration for tool calls.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Tool call quota: at most `max_calls` per `window_secs` per (session, tool).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolRateLimitConfig {
    /// Default quota applied to every tool.
    pub default: ToolLimits,
    /// Per-tool overrides by tool name.
    #[serde(default)]
    pub per_tool: HashMap<String, ToolLimits>,
}

/// Quota for one tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolLimits {
    /// Maximum calls per window.
    pub max_calls: u32,
    /// Window duration in seconds.
    pub window_secs: u64,
}

impl ToolLimits {
    pub fn new(max_calls: u32, window: Duration) -> Self {
        Self {
            max_calls,
            window_secs: window.as_secs().max(1),
        }
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl Default for ToolLimits {
    /// Five calls per minute.
    fn default() -> Self {
        Self {
            max_calls: 5,
            window_secs: 60,
        }
    }
}

impl Default for ToolRateLimitConfig {
    fn default() -> Self {
        Self::new(ToolLimits::default())
    }
}

impl ToolRateLimitConfig {
    pub fn new(default: ToolLimits) -> Self {
        Self {
            default,
            per_tool: HashMap::new(),
        }
    }

    /// Overrides the quota for one tool.
    pub fn with_tool_limit(mut self, tool: impl Into<String>, limits: ToolLimits) -> Self {
        self.per_tool.insert(tool.into(), limits);
        self
    }

    /// Returns the quota for a tool.
    pub fn limits_for(&self, tool: &str) -> ToolLimits {
        self.per_tool.get(tool).copied().unwrap_or(self.default)
    }
}
