//! Citation marker rewriting.
//!
//! The model marks claims with `[n]`. Each marker naming a known rank is
//! replaced by the verified `[source, p.page]` form; anything else is left
//! exactly as written. No citation is ever invented for an unknown rank.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::context::NumberedContext;
use super::response::Citation;

static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\d+)\]").expect("marker pattern is valid"));

/// Rewritten answer text and the citations it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitedAnswer {
    pub text: String,
    /// Unique citations in first-use order.
    pub citations: Vec<Citation>,
}

pub fn rewrite_citations(raw: &str, context: &NumberedContext) -> CitedAnswer {
    let mut citations: Vec<Citation> = Vec::new();

    let rewritten = MARKER.replace_all(raw, |caps: &Captures| {
        let citation = caps[1]
            .parse::<usize>()
            .ok()
            .and_then(|rank| context.citation_for(rank));

        match citation {
            Some(citation) => {
                if !citations.contains(citation) {
                    citations.push(citation.clone());
                }
                citation.to_string()
            }
            None => caps[0].to_string(),
        }
    });

    CitedAnswer {
        text: rewritten.trim().to_string(),
        citations,
    }
}
