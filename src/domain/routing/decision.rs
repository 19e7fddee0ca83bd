//! Routing decision and router output parsing.

use serde_json::Value;

use crate::domain::tools::ToolCallRequest;

/// Outcome of classifying one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingDecision {
    /// Invoke a tool with these parameters.
    Invoke(ToolCallRequest),
    /// Answer from the knowledge base.
    NoTool,
}

impl RoutingDecision {
    pub fn is_no_tool(&self) -> bool {
        matches!(self, RoutingDecision::NoTool)
    }
}

/// Parses raw router output. Never fails.
///
/// Output that does not start with `{` or `[`, is not valid JSON, is an
/// empty object or array, or names no tool, yields `NoTool`. For an array
/// only the first element is considered.
pub fn parse_router_output(raw: &str) -> RoutingDecision {
    let trimmed = raw.trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return RoutingDecision::NoTool;
    }

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(_) => return RoutingDecision::NoTool,
    };

    let candidate = match value {
        Value::Array(items) => match items.into_iter().next() {
            Some(first) => first,
            None => return RoutingDecision::NoTool,
        },
        other => other,
    };

    match &candidate {
        Value::Object(map) if map.is_empty() => return RoutingDecision::NoTool,
        Value::Object(_) => {}
        _ => return RoutingDecision::NoTool,
    }

    match serde_json::from_value::<ToolCallRequest>(candidate) {
        Ok(call) if !call.tool.trim().is_empty() => RoutingDecision::Invoke(call),
        _ => RoutingDecision::NoTool,
    }
}
