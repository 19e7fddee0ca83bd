//! Foundation module - Shared domain primitives.
//!
//! Contains the identifiers and error types that form the vocabulary
//! of the rest of the domain.

mod errors;
mod ids;

pub use errors::ValidationError;
pub use ids::{SessionId, UserId};
