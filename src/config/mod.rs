//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `RAGDESK` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use ragdesk::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Retrieving {} passages per question", config.rag.top_k);
//! ```

mod ai;
mod error;
mod rag;
mod rate_limit;
mod redis;
mod telemetry;

pub use ai::{AiConfig, AiProvider};
pub use error::{ConfigError, ValidationError};
pub use rag::RagConfig;
pub use rate_limit::RateLimitConfig;
pub use redis::RedisConfig;
pub use telemetry::{LogFormat, TelemetryConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields an offline
/// setup: mock generation, in-memory store, no passages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Generation backend
    #[serde(default)]
    pub ai: AiConfig,

    /// Shared store for the answer cache and rate counters
    #[serde(default)]
    pub redis: RedisConfig,

    /// Retrieval and answer cache
    #[serde(default)]
    pub rag: RagConfig,

    /// Tool call quotas
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `RAGDESK` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `RAGDESK__AI__PROVIDER=openai` -> `ai.provider = openai`
    /// - `RAGDESK__RAG__TOP_K=5` -> `rag.top_k = 5`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("RAGDESK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.redis.validate()?;
        self.rag.validate()?;
        self.rate_limit.validate()?;
        Ok(())
    }
}
