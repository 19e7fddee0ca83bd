//! Rate limiter adapters.
//!
//! `CounterRateLimiter` implements the `ToolRateLimiter` port on top of any
//! `KeyValueStore`. It uses the in-memory store for tests and single-process
//! runs, and Redis when several instances share counters.
//!
//! ## Usage
//!
//! ```ignore
//! use ragdesk::adapters::rate_limiter::{CounterRateLimiter, ToolRateLimitConfig};
//!
//! let limiter = CounterRateLimiter::new(store, ToolRateLimitConfig::default());
//! ```

mod config;
mod counter;

pub use config::{ToolLimits, ToolRateLimitConfig};
pub use counter::CounterRateLimiter;
