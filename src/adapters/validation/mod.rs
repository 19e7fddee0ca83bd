//! Validation Adapters - Schema validation implementations.
//!
//! Contains the adapter that checks tool payloads against JSON Schemas.

mod json_schema_validator;

pub use json_schema_validator::JsonSchemaValidator;
