//! Tool Registry - name to definition lookup for callable tools.
//!
//! Built once at startup through explicit `register` calls, then shared
//! read-only. Tool names are unique; registering a name twice is an error.
//!
//! # Example
//!
//! ```ignore
//! let mut registry = ToolRegistry::new();
//! registry.register(order_lookup_definition(store))?;
//! let registry = Arc::new(registry);
//!
//! let tool = registry.lookup("queryOrder");
//! ```

use std::collections::HashMap;

use thiserror::Error;

use super::ToolDefinition;

/// Errors raised while building the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    #[error("Tool name cannot be empty")]
    EmptyName,
}

/// Registry of all callable tools.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolDefinition>,

    /// Registration order, used when describing tools to the router.
    order: Vec<String>,
}

impl ToolRegistry {
    /// Creates a new empty tool registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool, rejecting blank or duplicate names.
    pub fn register(&mut self, definition: ToolDefinition) -> Result<(), RegistryError> {
        let name = definition.name().to_string();
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.tools.contains_key(&name) {
            return Err(RegistryError::DuplicateTool(name));
        }
        self.order.push(name.clone());
        self.tools.insert(name, definition);
        Ok(())
    }

    /// Gets a tool definition by name.
    pub fn lookup(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    /// Checks if a tool is registered.
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Returns tool names in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Returns definitions in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.order.iter().filter_map(move |name| self.tools.get(name))
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{SessionId, UserId};
    use crate::ports::ToolExecutor;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Arc;

    struct Noop;

    #[async_trait]
    impl ToolExecutor for Noop {
        async fn execute(&self, _: &Value, _: &UserId, _: &SessionId) -> String {
            "ok".to_string()
        }
    }

    fn sample_tool(name: &str) -> ToolDefinition {
        ToolDefinition::new(name, format!("Description for {}", name), json!({}), Arc::new(Noop))
    }

    #[test]
    fn new_registry_is_empty() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn register_adds_tool() {
        let mut registry = ToolRegistry::new();
        registry.register(sample_tool("queryOrder")).unwrap();

        assert!(registry.has_tool("queryOrder"));
        assert_eq!(registry.lookup("queryOrder").unwrap().name(), "queryOrder");
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(sample_tool("queryOrder")).unwrap();

        let err = registry.register(sample_tool("queryOrder")).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateTool("queryOrder".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut registry = ToolRegistry::new();
        assert_eq!(
            registry.register(sample_tool("  ")).unwrap_err(),
            RegistryError::EmptyName
        );
    }

    #[test]
    fn lookup_of_unknown_tool_is_none() {
        assert!(ToolRegistry::new().lookup("missing").is_none());
    }

    #[test]
    fn names_and_definitions_keep_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register(sample_tool("b")).unwrap();
        registry.register(sample_tool("a")).unwrap();

        assert_eq!(registry.tool_names(), vec!["b", "a"]);
        let names: Vec<&str> = registry.definitions().map(|d| d.name()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
