//! Key-value store adapters.
//!
//! - `InMemoryKeyValueStore` - for tests and single-process runs
//! - `RedisKeyValueStore` - shared store for multi-instance deployments

mod in_memory_store;
mod redis_store;

pub use in_memory_store::InMemoryKeyValueStore;
pub use redis_store::RedisKeyValueStore;
