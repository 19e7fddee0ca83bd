//! Retriever Port - Interface for the nearest-neighbor search collaborator.

use async_trait::async_trait;

use crate::domain::knowledge::RetrievedPassage;

/// Errors that can occur during retrieval
#[derive(Debug, Clone, thiserror::Error)]
pub enum RetrievalError {
    #[error("Retrieval backend unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

/// Port for fetching the passages most relevant to a query.
#[async_trait]
pub trait PassageRetriever: Send + Sync {
    /// Return up to `top_k` passages, best match first.
    ///
    /// Retrieval is best-effort; an empty list is a valid answer.
    async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedPassage>, RetrievalError>;
}
