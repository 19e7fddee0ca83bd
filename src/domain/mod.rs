//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors)
//! - `knowledge` - Grounded answers: cache keys, context, citations, prompt
//! - `tools` - Tool definitions, registry and call requests
//! - `routing` - Router prompt and decision parsing

pub mod foundation;
pub mod knowledge;
pub mod routing;
pub mod tools;
