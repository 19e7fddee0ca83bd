//! Prompt for the decision router.
//!
//! The router is a classifier. Its prompt lists the registered tools and
//! forbids anything but one of two JSON shapes in the reply.

use crate::domain::tools::ToolRegistry;

/// Builds the classification prompt for a user message.
pub fn build_router_prompt(registry: &ToolRegistry, message: &str) -> String {
    let mut tools = String::new();
    for def in registry.definitions() {
        let params = def
            .parameter_names()
            .iter()
            .map(|name| format!("\"{}\": \"<value exactly as the user wrote it>\"", name))
            .collect::<Vec<_>>()
            .join(", ");
        tools.push_str(&format!(
            "- {}: {} (params: {{{}}})\n",
            def.name(),
            def.description(),
            params
        ));
    }
    if tools.is_empty() {
        tools.push_str("- (none)\n");
    }

    format!(
        "You are a routing assistant. Decide whether the user message requires one of the tools below.

Available tools:
{tools}
Rules:
1. If the message clearly asks for something a tool provides, reply with a tool call. Copy parameter values from the message verbatim, without cleaning or reformatting them.
2. In every other case reply with an empty JSON object: {{}}
3. Never answer the question yourself and never write prose.
4. Reply with valid JSON only, in exactly one of these forms:
   {{\"tool\": \"<tool name>\", \"params\": {{...}}}}
   {{}}

User message: {message}
",
        tools = tools,
        message = message.trim(),
    )
}
