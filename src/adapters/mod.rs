//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the core to external systems:
//! - `ai` - Text generation (OpenAI-compatible, mock)
//! - `cache` - Key-value stores (in-memory, Redis)
//! - `identity` - Session to user resolution
//! - `orders` - Order backend
//! - `rate_limiter` - Per-(session, tool) call quotas
//! - `retrieval` - Passage search
//! - `tools` - Tool executors and their registry entries
//! - `validation` - JSON Schema validation of tool payloads

pub mod ai;
pub mod cache;
pub mod identity;
pub mod orders;
pub mod rate_limiter;
pub mod retrieval;
pub mod tools;
pub mod validation;

pub use ai::{MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use cache::{InMemoryKeyValueStore, RedisKeyValueStore};
pub use identity::SessionIdentityResolver;
pub use orders::InMemoryOrderStore;
pub use rate_limiter::{CounterRateLimiter, ToolLimits, ToolRateLimitConfig};
pub use retrieval::InMemoryPassageIndex;
pub use tools::{order_lookup_definition, OrderLookupTool};
pub use validation::JsonSchemaValidator;
