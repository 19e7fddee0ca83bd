//! Tool definition - schema, permissions and executor for a tool.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::ports::ToolExecutor;

/// Definition of a tool that the router may select.
///
/// Immutable once built. The parameter schema validates the whole
/// `{tool, params}` envelope, not just the params object.
///
/// # Examples
///
/// ```ignore
/// let definition = ToolDefinition::new(
///     "queryOrder",
///     "Look up the current status of an order",
///     serde_json::json!({
///         "type": "object",
///         "required": ["tool", "params"],
///         "properties": {
///             "tool": { "enum": ["queryOrder"] },
///             "params": {
///                 "type": "object",
///                 "required": ["orderId"],
///                 "properties": { "orderId": { "type": "string" } }
///             }
///         }
///     }),
///     Arc::new(OrderLookupTool::new(store)),
/// )
/// .with_permission("order:read");
/// ```
#[derive(Clone)]
pub struct ToolDefinition {
    name: String,
    description: String,
    required_permissions: BTreeSet<String>,
    parameters_schema: Value,
    executor: Arc<dyn ToolExecutor>,
}

impl ToolDefinition {
    /// Creates a new tool definition with no required permissions.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters_schema: Value,
        executor: Arc<dyn ToolExecutor>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required_permissions: BTreeSet::new(),
            parameters_schema,
            executor,
        }
    }

    /// Adds a required permission.
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.required_permissions.insert(permission.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn required_permissions(&self) -> &BTreeSet<String> {
        &self.required_permissions
    }

    pub fn parameters_schema(&self) -> &Value {
        &self.parameters_schema
    }

    pub fn executor(&self) -> &Arc<dyn ToolExecutor> {
        &self.executor
    }

    /// Names of the fields expected inside `params`.
    ///
    /// Reads `properties.params.properties` of the envelope schema and
    /// falls back to top-level `properties` for schemas without an envelope.
    pub fn parameter_names(&self) -> Vec<String> {
        let params = self
            .parameters_schema
            .pointer("/properties/params/properties")
            .or_else(|| self.parameters_schema.get("properties"))
            .and_then(Value::as_object);

        params
            .map(|props| props.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("required_permissions", &self.required_permissions)
            .field("parameters_schema", &self.parameters_schema)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{SessionId, UserId};
    use async_trait::async_trait;
    use serde_json::json;

    struct Noop;

    #[async_trait]
    impl ToolExecutor for Noop {
        async fn execute(&self, _: &Value, _: &UserId, _: &SessionId) -> String {
            String::new()
        }
    }

    fn envelope_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "tool": { "enum": ["queryOrder"] },
                "params": {
                    "type": "object",
                    "properties": { "orderId": { "type": "string" } }
                }
            }
        })
    }

    #[test]
    fn new_creates_definition() {
        let def = ToolDefinition::new("queryOrder", "Look up orders", envelope_schema(), Arc::new(Noop))
            .with_permission("order:read");

        assert_eq!(def.name(), "queryOrder");
        assert_eq!(def.description(), "Look up orders");
        assert!(def.required_permissions().contains("order:read"));
    }

    #[test]
    fn parameter_names_read_envelope_params() {
        let def = ToolDefinition::new("queryOrder", "d", envelope_schema(), Arc::new(Noop));
        assert_eq!(def.parameter_names(), vec!["orderId".to_string()]);
    }

    #[test]
    fn parameter_names_fall_back_to_top_level_properties() {
        let schema = json!({"type": "object", "properties": {"city": {"type": "string"}}});
        let def = ToolDefinition::new("weather", "d", schema, Arc::new(Noop));
        assert_eq!(def.parameter_names(), vec!["city".to_string()]);
    }

    #[test]
    fn debug_omits_executor() {
        let def = ToolDefinition::new("queryOrder", "d", envelope_schema(), Arc::new(Noop));
        let debug = format!("{:?}", def);
        assert!(debug.contains("queryOrder"));
        assert!(!debug.contains("executor"));
    }
}
