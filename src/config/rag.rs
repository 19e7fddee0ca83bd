//! Knowledge-base answering configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::knowledge::TextSplitter;

/// Retrieval and answer-cache settings
#[derive(Debug, Clone, Deserialize)]
pub struct RagConfig {
    /// Passages retrieved per question
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// TTL of grounded answers, in hours
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,

    /// Prefix of answer cache keys
    #[serde(default = "default_cache_namespace")]
    pub cache_namespace: String,

    /// JSON file of pages loaded into the in-memory index
    pub passages_path: Option<PathBuf>,

    /// Characters per indexed chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters shared by consecutive chunks
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

impl RagConfig {
    /// Get answer TTL as Duration
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_hours * 60 * 60)
    }

    /// Splitter used to chunk loaded pages
    pub fn splitter(&self) -> Result<TextSplitter, ValidationError> {
        TextSplitter::new(self.chunk_size, self.chunk_overlap)
            .map_err(|_| ValidationError::InvalidChunking)
    }

    /// Validate RAG configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.top_k == 0 {
            return Err(ValidationError::InvalidTopK);
        }
        if self.cache_ttl_hours == 0 {
            return Err(ValidationError::InvalidCacheTtl);
        }
        if self.cache_namespace.trim().is_empty() {
            return Err(ValidationError::EmptyCacheNamespace);
        }
        self.splitter()?;
        Ok(())
    }
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            cache_ttl_hours: default_cache_ttl_hours(),
            cache_namespace: default_cache_namespace(),
            passages_path: None,
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

fn default_top_k() -> usize {
    3
}

fn default_cache_ttl_hours() -> u64 {
    1
}

fn default_cache_namespace() -> String {
    "rag:answer".to_string()
}

fn default_chunk_size() -> usize {
    300
}

fn default_chunk_overlap() -> usize {
    50
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rag_config_defaults() {
        let config = RagConfig::default();
        assert_eq!(config.top_k, 3);
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.cache_namespace, "rag:answer");
        assert_eq!(config.splitter(), Ok(TextSplitter::new(300, 50).unwrap()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_top_k_is_rejected() {
        let config = RagConfig {
            top_k: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTopK));
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let config = RagConfig {
            cache_ttl_hours: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidCacheTtl));
    }

    #[test]
    fn test_blank_namespace_is_rejected() {
        let config = RagConfig {
            cache_namespace: " ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyCacheNamespace));
    }

    #[test]
    fn test_overlap_not_below_chunk_size_is_rejected() {
        let config = RagConfig {
            chunk_size: 50,
            chunk_overlap: 50,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidChunking));

        let config = RagConfig {
            chunk_size: 0,
            chunk_overlap: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidChunking));
    }
}
