//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the core and its collaborators. Adapters implement these ports.
//!
//! ## Generation and Retrieval
//!
//! - `AIProvider` - single-shot text generation
//! - `PassageRetriever` - nearest-neighbor passage search
//!
//! ## Shared State
//!
//! - `KeyValueStore` - TTL key-value store behind the answer cache and counters
//! - `ToolRateLimiter` - per-(session, tool) call quota
//!
//! ## Tool Pipeline
//!
//! - `ToolSchemaValidator` - structural validation of tool payloads
//! - `IdentityResolver` - session to user mapping
//! - `ToolExecutor` - runs one tool, always answering with text
//! - `OrderStatusReader` - backend consumed by the order lookup tool

mod ai_provider;
mod identity_resolver;
mod key_value_store;
mod order_status_reader;
mod rate_limiter;
mod retriever;
mod schema_validator;
mod tool_executor;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use identity_resolver::{IdentityError, IdentityResolver};
pub use key_value_store::{KeyValueStore, StoreError};
pub use order_status_reader::{OrderStatusReader, OrderStoreError};
pub use rate_limiter::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, ToolRateLimiter,
};
pub use retriever::{PassageRetriever, RetrievalError};
pub use schema_validator::{SchemaValidationError, ToolSchemaValidator};
pub use tool_executor::ToolExecutor;
