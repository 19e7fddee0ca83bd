//! In-memory passage index with term-overlap ranking.
//!
//! Passages can be added directly or ingested from page text through a
//! `TextSplitter`. A page file is a JSON array shaped like the one below;
//! each page's text is split into chunks that keep the page's source and
//! number:
//!
//! ```json
//! [
//!   { "text": "...", "source": "handbook.pdf", "page": 3 },
//!   { "text": "...", "metadata": { "source": "faq.pdf", "page": "7" } }
//! ]
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::knowledge::{RetrievedPassage, TextSplitter};
use crate::ports::{PassageRetriever, RetrievalError};

/// Errors raised while loading a passage file
#[derive(Debug, thiserror::Error)]
pub enum PassageFileError {
    #[error("Failed to read passage file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse passage file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Passage file must contain a JSON array")]
    NotAnArray,
}

#[derive(Debug, Clone)]
struct IndexedPassage {
    passage: RetrievedPassage,
    terms: HashSet<String>,
}

/// Term-overlap index over passages held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPassageIndex {
    passages: Arc<RwLock<Vec<IndexedPassage>>>,
}

impl InMemoryPassageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an index pre-filled with passages.
    pub fn with_passages(passages: impl IntoIterator<Item = RetrievedPassage>) -> Self {
        let indexed = passages.into_iter().map(Self::index).collect();
        Self {
            passages: Arc::new(RwLock::new(indexed)),
        }
    }

    /// Loads pages from a JSON file and ingests each one through `splitter`.
    /// Entries without text are skipped.
    pub async fn load_json_file(
        path: impl AsRef<Path>,
        splitter: &TextSplitter,
    ) -> Result<Self, PassageFileError> {
        let raw = tokio::fs::read_to_string(path).await?;
        let entries = match serde_json::from_str::<Value>(&raw)? {
            Value::Array(entries) => entries,
            _ => return Err(PassageFileError::NotAnArray),
        };

        let index = Self::new();
        for entry in &entries {
            let Some(text) = entry.get("text").and_then(Value::as_str) else {
                continue;
            };
            let metadata = entry.get("metadata").unwrap_or(entry);
            let page = RetrievedPassage::from_metadata(text, metadata);
            index.ingest(&page.text, &page.source, page.page, splitter).await;
        }
        Ok(index)
    }

    pub async fn add(&self, passage: RetrievedPassage) {
        self.passages.write().await.push(Self::index(passage));
    }

    /// Splits page text into chunks and indexes each one under the same
    /// source and page. Returns the number of chunks added.
    pub async fn ingest(
        &self,
        text: &str,
        source: &str,
        page: u32,
        splitter: &TextSplitter,
    ) -> usize {
        let chunks: Vec<IndexedPassage> = splitter
            .split(text)
            .into_iter()
            .filter(|chunk| !chunk.trim().is_empty())
            .map(|chunk| Self::index(RetrievedPassage::new(chunk, source, page)))
            .collect();
        let added = chunks.len();
        self.passages.write().await.extend(chunks);
        added
    }

    pub async fn len(&self) -> usize {
        self.passages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.passages.read().await.is_empty()
    }

    fn index(passage: RetrievedPassage) -> IndexedPassage {
        let terms = terms_of(&passage.text);
        IndexedPassage { passage, terms }
    }
}

fn terms_of(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[async_trait]
impl PassageRetriever for InMemoryPassageIndex {
    async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedPassage>, RetrievalError> {
        let query_terms = terms_of(query);
        if query_terms.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }

        let passages = self.passages.read().await;
        let mut scored: Vec<(usize, usize)> = passages
            .iter()
            .enumerate()
            .map(|(i, p)| (i, query_terms.intersection(&p.terms).count()))
            .filter(|(_, score)| *score > 0)
            .collect();

        // Stable sort keeps insertion order among equal scores.
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(i, _)| passages[i].passage.clone())
            .collect())
    }
}
