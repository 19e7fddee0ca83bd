//! AnswerQuestionHandler - grounded answers from the knowledge base.
//!
//! Pipeline for one question:
//! 1. Cache lookup by (session, normalized question)
//! 2. Retrieve the top passages
//! 3. Number them into a context block
//! 4. Generate once from a strict grounding prompt
//! 5. Rewrite `[n]` markers into verified citations
//! 6. Reject empty or hedged output
//! 7. Cache the result (short TTL for no-answer results)

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};
use uuid::Uuid;

use crate::application::AnswerCache;
use crate::domain::foundation::SessionId;
use crate::domain::knowledge::{
    build_grounded_prompt, is_hedged, rewrite_citations, CacheKeyBuilder, NumberedContext,
    RagResponse,
};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, MessageRole, PassageRetriever, RequestMetadata,
    RetrievalError,
};

/// Passages retrieved per question unless configured otherwise.
pub const DEFAULT_TOP_K: usize = 3;

/// TTL for no-answer results. Fixed and short so new documents show up soon.
pub const NEGATIVE_CACHE_TTL: Duration = Duration::from_secs(10 * 60);

/// Command to answer a question from the knowledge base
#[derive(Debug, Clone)]
pub struct AnswerQuestionCommand {
    pub session_id: SessionId,
    pub question: String,
    pub trace_id: String,
}

impl AnswerQuestionCommand {
    /// Creates a command with a fresh trace id.
    pub fn new(session_id: SessionId, question: impl Into<String>) -> Self {
        Self {
            session_id,
            question: question.into(),
            trace_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = trace_id.into();
        self
    }
}

/// Error type for answering a question.
///
/// Cache failures never surface here; only the retrieval and generation
/// collaborators can fail an answer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AnswerError {
    #[error("Retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("Generation failed: {0}")]
    Generation(#[from] AIError),
}

/// Tunables for the answer engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerEngineConfig {
    /// Passages retrieved per question.
    pub top_k: usize,
    /// TTL for grounded answers.
    pub answer_ttl: Duration,
    /// TTL for no-answer results.
    pub no_answer_ttl: Duration,
}

impl Default for AnswerEngineConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            answer_ttl: Duration::from_secs(60 * 60),
            no_answer_ttl: NEGATIVE_CACHE_TTL,
        }
    }
}

impl AnswerEngineConfig {
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    pub fn with_answer_ttl(mut self, ttl: Duration) -> Self {
        self.answer_ttl = ttl;
        self
    }
}

/// Handler producing grounded, cited answers.
pub struct GroundedAnswerEngine {
    retriever: Arc<dyn PassageRetriever>,
    ai: Arc<dyn AIProvider>,
    cache: AnswerCache,
    keys: CacheKeyBuilder,
    config: AnswerEngineConfig,
}

impl GroundedAnswerEngine {
    pub fn new(
        retriever: Arc<dyn PassageRetriever>,
        ai: Arc<dyn AIProvider>,
        cache: AnswerCache,
        keys: CacheKeyBuilder,
        config: AnswerEngineConfig,
    ) -> Self {
        Self {
            retriever,
            ai,
            cache,
            keys,
            config,
        }
    }

    pub fn config(&self) -> &AnswerEngineConfig {
        &self.config
    }

    pub async fn handle(&self, cmd: AnswerQuestionCommand) -> Result<RagResponse, AnswerError> {
        let cache_key = self.keys.key(&cmd.session_id, &cmd.question);

        // 1. Cached answers are returned as-is
        if let Some(cached) = self.cache.get(&cache_key).await {
            return Ok(cached);
        }

        // 2. Retrieve
        let passages = self
            .retriever
            .retrieve(&cmd.question, self.config.top_k)
            .await?;

        // 3. Number the context
        let context = NumberedContext::build(&passages);
        if context.is_empty() {
            debug!(
                session_id = %cmd.session_id,
                cache_key = %cache_key,
                retrieved = passages.len(),
                "No usable passages, returning no-answer"
            );
            return Ok(self.remember_no_answer(&cache_key).await);
        }

        // 4. Generate
        let prompt = build_grounded_prompt(context.block(), &cmd.question);
        let request = CompletionRequest::new(RequestMetadata::new(
            cmd.session_id.clone(),
            cmd.trace_id.clone(),
        ))
        .with_message(MessageRole::User, prompt);
        let raw = self.ai.complete(request).await?.content;

        // 5. Cite
        let cited = rewrite_citations(&raw, &context);

        // 6. Guard
        if is_hedged(&cited.text) {
            debug!(
                session_id = %cmd.session_id,
                cache_key = %cache_key,
                "Generated answer rejected by hallucination guard"
            );
            return Ok(self.remember_no_answer(&cache_key).await);
        }

        // 7. Cache
        let response = RagResponse::new(cited.text, cited.citations);
        self.cache
            .put(&cache_key, &response, self.config.answer_ttl)
            .await;

        info!(
            session_id = %cmd.session_id,
            cache_key = %cache_key,
            citations = response.citations.len(),
            "Grounded answer generated"
        );

        Ok(response)
    }

    async fn remember_no_answer(&self, cache_key: &str) -> RagResponse {
        let response = RagResponse::no_answer();
        self.cache
            .put(cache_key, &response, self.config.no_answer_ttl)
            .await;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::cache::InMemoryKeyValueStore;
    use crate::adapters::retrieval::InMemoryPassageIndex;
    use crate::domain::knowledge::{Citation, RetrievedPassage, NO_ANSWER};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Retriever returning a fixed list and counting calls.
    struct FixedRetriever {
        passages: Vec<RetrievedPassage>,
        calls: AtomicUsize,
    }

    impl FixedRetriever {
        fn new(passages: Vec<RetrievedPassage>) -> Self {
            Self {
                passages,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PassageRetriever for FixedRetriever {
        async fn retrieve(
            &self,
            _query: &str,
            top_k: usize,
        ) -> Result<Vec<RetrievedPassage>, RetrievalError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.passages.iter().take(top_k).cloned().collect())
        }
    }

    struct FailingRetriever;

    #[async_trait]
    impl PassageRetriever for FailingRetriever {
        async fn retrieve(&self, _: &str, _: usize) -> Result<Vec<RetrievedPassage>, RetrievalError> {
            Err(RetrievalError::Unavailable("index offline".into()))
        }
    }

    struct Fixture {
        engine: GroundedAnswerEngine,
        retriever: Arc<FixedRetriever>,
        ai: Arc<MockAIProvider>,
        store: InMemoryKeyValueStore,
    }

    fn fixture(passages: Vec<RetrievedPassage>, ai: MockAIProvider) -> Fixture {
        let retriever = Arc::new(FixedRetriever::new(passages));
        let ai = Arc::new(ai);
        let store = InMemoryKeyValueStore::new();
        let engine = GroundedAnswerEngine::new(
            retriever.clone(),
            ai.clone(),
            AnswerCache::new(Arc::new(store.clone())),
            CacheKeyBuilder::default(),
            AnswerEngineConfig::default(),
        );
        Fixture {
            engine,
            retriever,
            ai,
            store,
        }
    }

    fn policy_passages() -> Vec<RetrievedPassage> {
        vec![
            RetrievedPassage::new("Remote work needs approval.", "policy.pdf", 3),
            RetrievedPassage::new("Equipment is provided.", "it.pdf", 8),
        ]
    }

    fn session() -> SessionId {
        SessionId::new("session-1").unwrap()
    }

    fn cmd(question: &str) -> AnswerQuestionCommand {
        AnswerQuestionCommand::new(session(), question)
    }

    #[tokio::test]
    async fn markers_become_verified_citations() {
        let f = fixture(
            policy_passages(),
            MockAIProvider::new().with_response("Approval is required [1]. See also [99]."),
        );

        let response = f.engine.handle(cmd("Is remote work allowed?")).await.unwrap();

        assert_eq!(response.answer, "Approval is required [policy.pdf, p.3]. See also [99].");
        assert_eq!(response.citations, vec![Citation::new("policy.pdf", 3)]);
    }

    #[tokio::test]
    async fn second_identical_question_is_served_from_cache() {
        let f = fixture(
            policy_passages(),
            MockAIProvider::new().with_response("Approval is required [1]."),
        );

        let first = f.engine.handle(cmd("Is remote work allowed?")).await.unwrap();
        let second = f.engine.handle(cmd("is remote   work allowed")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(f.retriever.calls(), 1);
        assert_eq!(f.ai.call_count(), 1);
    }

    #[tokio::test]
    async fn grounded_answer_uses_positive_ttl() {
        let f = fixture(policy_passages(), MockAIProvider::new().with_response("Yes [1]."));

        f.engine.handle(cmd("remote work?")).await.unwrap();

        let key = CacheKeyBuilder::default().key(&session(), "remote work?");
        let ttl = f.store.ttl(&key).await.unwrap();
        assert!(ttl > NEGATIVE_CACHE_TTL);
    }

    #[tokio::test]
    async fn empty_retrieval_returns_no_answer_with_short_ttl() {
        let f = fixture(vec![], MockAIProvider::new());

        let response = f.engine.handle(cmd("What is the parking policy?")).await.unwrap();

        assert_eq!(response.answer, NO_ANSWER);
        assert!(response.citations.is_empty());
        assert_eq!(f.ai.call_count(), 0);

        let key = CacheKeyBuilder::default().key(&session(), "What is the parking policy?");
        let ttl = f.store.ttl(&key).await.unwrap();
        assert!(ttl <= NEGATIVE_CACHE_TTL);
    }

    #[tokio::test]
    async fn all_blank_passages_count_as_empty() {
        let f = fixture(
            vec![RetrievedPassage::new("   ", "a.pdf", 1)],
            MockAIProvider::new(),
        );

        let response = f.engine.handle(cmd("anything")).await.unwrap();

        assert!(response.is_no_answer());
        assert_eq!(f.ai.call_count(), 0);
    }

    #[tokio::test]
    async fn hedged_output_is_replaced_by_no_answer() {
        let f = fixture(
            policy_passages(),
            MockAIProvider::new().with_response("I don't know, it is not mentioned."),
        );

        let response = f.engine.handle(cmd("Who founded the company?")).await.unwrap();

        assert!(response.is_no_answer());
        let key = CacheKeyBuilder::default().key(&session(), "Who founded the company?");
        assert!(f.store.ttl(&key).await.unwrap() <= NEGATIVE_CACHE_TTL);
    }

    #[tokio::test]
    async fn empty_output_is_replaced_by_no_answer() {
        let f = fixture(policy_passages(), MockAIProvider::new().with_response("   "));

        let response = f.engine.handle(cmd("remote?")).await.unwrap();

        assert!(response.is_no_answer());
    }

    #[tokio::test]
    async fn prompt_carries_numbered_context_and_literal_question() {
        let f = fixture(policy_passages(), MockAIProvider::new().with_response("Yes [1]."));

        f.engine.handle(cmd("Is 100% remote ok?")).await.unwrap();

        let calls = f.ai.get_calls();
        let prompt = calls[0].last_user_content().unwrap();
        assert!(prompt.contains("[1] Remote work needs approval."));
        assert!(prompt.contains("[2] Equipment is provided."));
        assert!(prompt.contains("Is 100% remote ok?"));
        assert!(!prompt.contains("%%"));
    }

    #[tokio::test]
    async fn top_k_limits_retrieval() {
        let passages = (1..=5)
            .map(|i| RetrievedPassage::new(format!("passage {}", i), "doc.pdf", i))
            .collect();
        let f = fixture(passages, MockAIProvider::new().with_response("See [4]."));

        let response = f.engine.handle(cmd("passage")).await.unwrap();

        // Only three passages were numbered, so [4] has nothing to point at.
        assert_eq!(response.answer, "See [4].");
        assert!(response.citations.is_empty());
    }

    #[tokio::test]
    async fn retrieval_failure_propagates() {
        let engine = GroundedAnswerEngine::new(
            Arc::new(FailingRetriever),
            Arc::new(MockAIProvider::new()),
            AnswerCache::new(Arc::new(InMemoryKeyValueStore::new())),
            CacheKeyBuilder::default(),
            AnswerEngineConfig::default(),
        );

        assert!(matches!(
            engine.handle(cmd("q")).await,
            Err(AnswerError::Retrieval(_))
        ));
    }

    #[tokio::test]
    async fn generation_failure_propagates_and_is_not_cached() {
        let f = fixture(
            policy_passages(),
            MockAIProvider::new().with_error(MockError::Unavailable {
                message: "overloaded".into(),
            }),
        );

        assert!(matches!(
            f.engine.handle(cmd("remote?")).await,
            Err(AnswerError::Generation(_))
        ));
        assert!(f.store.is_empty().await);
    }

    #[tokio::test]
    async fn works_against_in_memory_index() {
        let index = InMemoryPassageIndex::with_passages(vec![RetrievedPassage::new(
            "Annual leave is 20 days.",
            "handbook.pdf",
            3,
        )]);
        let engine = GroundedAnswerEngine::new(
            Arc::new(index),
            Arc::new(MockAIProvider::new().with_response("You get 20 days [1].")),
            AnswerCache::new(Arc::new(InMemoryKeyValueStore::new())),
            CacheKeyBuilder::default(),
            AnswerEngineConfig::default(),
        );

        let response = engine.handle(cmd("How much annual leave?")).await.unwrap();

        assert_eq!(response.answer, "You get 20 days [handbook.pdf, p.3].");
    }
}
