//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Invalid AI base URL format")]
    InvalidBaseUrl,

    #[error("Retrieval depth must be at least 1")]
    InvalidTopK,

    #[error("Answer cache TTL must be at least 1 hour")]
    InvalidCacheTtl,

    #[error("Cache namespace cannot be empty")]
    EmptyCacheNamespace,

    #[error("Chunk size must be positive and larger than chunk overlap")]
    InvalidChunking,

    #[error("Rate limit window and max calls must be at least 1")]
    InvalidRateLimit,
}
