//! Tool call request parsed from the router's output.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request to invoke a tool. One per message, never persisted.
///
/// Parameters stay opaque JSON until the tool's schema has checked them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Name of the tool to invoke.
    pub tool: String,

    /// Parameters for the tool.
    #[serde(default = "empty_params")]
    pub params: Value,
}

fn empty_params() -> Value {
    Value::Object(Default::default())
}

impl ToolCallRequest {
    pub fn new(tool: impl Into<String>, params: Value) -> Self {
        Self {
            tool: tool.into(),
            params,
        }
    }

    /// The serialized `{tool, params}` envelope that schemas validate.
    pub fn envelope(&self) -> Value {
        serde_json::json!({
            "tool": self.tool,
            "params": self.params,
        })
    }
}
