//! RetrievedPassage - one search hit from the knowledge base.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Source name used when a passage carries no `source` metadata.
pub const UNKNOWN_SOURCE: &str = "unknown.pdf";

/// Page used when a passage's page metadata is absent or unparsable.
pub const DEFAULT_PAGE: u32 = 1;

/// A passage returned by the retrieval collaborator.
///
/// Lives only for the duration of a single answer computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievedPassage {
    pub text: String,
    pub source: String,
    pub page: u32,
}

impl RetrievedPassage {
    pub fn new(text: impl Into<String>, source: impl Into<String>, page: u32) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            page,
        }
    }

    /// Builds a passage from loosely-typed search metadata.
    ///
    /// `page` may be a JSON number or a numeric string; anything else
    /// (missing, negative, non-numeric) falls back to page 1.
    pub fn from_metadata(text: impl Into<String>, metadata: &Value) -> Self {
        let source = metadata
            .get("source")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(UNKNOWN_SOURCE);

        Self::new(text, source, extract_page_number(metadata.get("page")))
    }

    /// True when the passage has no usable text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Reads a page number out of a metadata value, defaulting to 1.
pub fn extract_page_number(value: Option<&Value>) -> u32 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|p| u32::try_from(p).ok())
            .unwrap_or(DEFAULT_PAGE),
        Some(Value::String(s)) => s.trim().parse::<u32>().unwrap_or(DEFAULT_PAGE),
        _ => DEFAULT_PAGE,
    }
}
