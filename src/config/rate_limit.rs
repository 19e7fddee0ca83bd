//! Tool rate limit configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Per-(session, tool) call quota
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Window length in minutes
    #[serde(default = "default_window_minutes")]
    pub window_minutes: u64,

    /// Calls allowed per window
    #[serde(default = "default_max_calls")]
    pub max_calls: u32,
}

impl RateLimitConfig {
    /// Get window as Duration
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_minutes * 60)
    }

    /// Validate rate limit configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.window_minutes == 0 || self.max_calls == 0 {
            return Err(ValidationError::InvalidRateLimit);
        }
        Ok(())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_minutes: default_window_minutes(),
            max_calls: default_max_calls(),
        }
    }
}

fn default_window_minutes() -> u64 {
    1
}

fn default_max_calls() -> u32 {
    5
}
