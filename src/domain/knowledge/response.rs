//! Citation and RagResponse - the structured output of the answer engine.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::prompt::NO_ANSWER;

/// A verified reference to a page of a source document.
///
/// Equality is by value, which is what citation deduplication relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Citation {
    pub source: String,
    pub page: u32,
}

impl Citation {
    pub fn new(source: impl Into<String>, page: u32) -> Self {
        Self {
            source: source.into(),
            page,
        }
    }
}

impl fmt::Display for Citation {
    /// Inline form used when rewriting markers: `[policy.pdf, p.3]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, p.{}]", self.source, self.page)
    }
}

/// Answer text plus the unique citations it actually references.
///
/// This is the unit that is cached and returned to structured callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RagResponse {
    pub answer: String,
    pub citations: Vec<Citation>,
}

impl RagResponse {
    pub fn new(answer: impl Into<String>, citations: Vec<Citation>) -> Self {
        Self {
            answer: answer.into(),
            citations,
        }
    }

    /// The fixed "cannot answer from documents" response.
    pub fn no_answer() -> Self {
        Self::new(NO_ANSWER, Vec::new())
    }

    pub fn is_no_answer(&self) -> bool {
        self.answer == NO_ANSWER && self.citations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn citation_displays_inline_form() {
        assert_eq!(Citation::new("policy.pdf", 3).to_string(), "[policy.pdf, p.3]");
    }

    #[test]
    fn no_answer_has_fixed_text_and_no_citations() {
        let response = RagResponse::no_answer();
        assert_eq!(response.answer, NO_ANSWER);
        assert!(response.citations.is_empty());
        assert!(response.is_no_answer());
    }

    #[test]
    fn rag_response_serializes_for_cache() {
        let response = RagResponse::new("Yes [a.pdf, p.2]", vec![Citation::new("a.pdf", 2)]);
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(
            json,
            r#"{"answer":"Yes [a.pdf, p.2]","citations":[{"source":"a.pdf","page":2}]}"#
        );
        let back: RagResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, response);
    }
}
