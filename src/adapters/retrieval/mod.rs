//! Retrieval adapters.
//!
//! `InMemoryPassageIndex` ranks passages by term overlap. It stands in for
//! a vector store during development and in tests.

mod in_memory_index;

pub use in_memory_index::{InMemoryPassageIndex, PassageFileError};
