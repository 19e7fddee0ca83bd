//! Knowledge module - Grounded answering over retrieved passages.
//!
//! Pure domain logic for the knowledge-base path: cache keys, the numbered
//! context handed to the model, the prompt, citation rewriting and the
//! hallucination guard. I/O lives behind ports.

mod cache_key;
mod citation;
mod context;
mod passage;
mod prompt;
mod response;
mod splitter;

pub use cache_key::{normalize_question, CacheKeyBuilder, DEFAULT_NAMESPACE};
pub use citation::{rewrite_citations, CitedAnswer};
pub use context::NumberedContext;
pub use passage::{extract_page_number, RetrievedPassage, DEFAULT_PAGE, UNKNOWN_SOURCE};
pub use prompt::{build_grounded_prompt, escape_percent, is_hedged, HEDGING_PHRASES, NO_ANSWER};
pub use response::{Citation, RagResponse};
pub use splitter::{TextSplitter, DEFAULT_MAX_CHUNKS};
