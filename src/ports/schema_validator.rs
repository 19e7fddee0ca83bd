//! Schema Validator Port - Tool payload validation interface.
//!
//! The dispatcher validates every `{tool, params}` envelope against the
//! parameter schema declared by the tool before anything executes.

use serde_json::Value;
use thiserror::Error;

/// Port for validating a payload against a JSON Schema document.
pub trait ToolSchemaValidator: Send + Sync {
    /// Returns `Ok(())` if the payload satisfies the schema.
    fn validate(&self, payload: &Value, schema: &Value) -> Result<(), SchemaValidationError>;
}

/// Errors that can occur during schema validation.
///
/// Field paths use dotted notation rooted at the payload (`params.orderId`).
#[derive(Debug, Clone, Error)]
pub enum SchemaValidationError {
    #[error("Missing required field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid type for field {field}: expected {expected}, got {actual}")]
    InvalidType {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Unexpected field: {field}")]
    UnexpectedField { field: String },

    #[error("Value out of range for field {field}: {value} not in [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("Invalid format for field {field}: expected {format}")]
    InvalidFormat { field: String, format: String },

    #[error("Schema validation failed: {message}")]
    Generic { message: String },

    #[error("Validation errors: {0:?}")]
    Multiple(Vec<SchemaValidationError>),
}

impl SchemaValidationError {
    /// Collapses a list of errors: one error stays as is, several become `Multiple`.
    pub fn from_errors(mut errors: Vec<SchemaValidationError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(SchemaValidationError::Multiple(errors)),
        }
    }

    /// Get the count of validation errors.
    pub fn error_count(&self) -> usize {
        match self {
            SchemaValidationError::Multiple(errors) => errors.len(),
            _ => 1,
        }
    }
}

impl PartialEq for SchemaValidationError {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
