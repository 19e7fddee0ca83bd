//! RouteMessageHandler - classify a message as tool call or knowledge question.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::SessionId;
use crate::domain::routing::{build_router_prompt, parse_router_output, RoutingDecision};
use crate::domain::tools::ToolRegistry;
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole, RequestMetadata};

/// Command to route one message
#[derive(Debug, Clone)]
pub struct RouteMessageCommand {
    pub session_id: SessionId,
    pub message: String,
    pub trace_id: String,
}

/// LLM-backed classifier choosing between the tool path and the knowledge base.
///
/// Only the generation call can fail. Whatever the model replies is parsed
/// leniently and degrades to `RoutingDecision::NoTool`.
pub struct DecisionRouter {
    ai: Arc<dyn AIProvider>,
    registry: Arc<ToolRegistry>,
}

impl DecisionRouter {
    pub fn new(ai: Arc<dyn AIProvider>, registry: Arc<ToolRegistry>) -> Self {
        Self { ai, registry }
    }

    pub async fn handle(&self, cmd: RouteMessageCommand) -> Result<RoutingDecision, AIError> {
        // Nothing to route to.
        if self.registry.is_empty() {
            return Ok(RoutingDecision::NoTool);
        }

        let prompt = build_router_prompt(&self.registry, &cmd.message);
        let request = CompletionRequest::new(RequestMetadata::new(
            cmd.session_id.clone(),
            cmd.trace_id,
        ))
        .with_message(MessageRole::User, prompt)
        .with_temperature(0.0);

        let raw = self.ai.complete(request).await?.content;
        let decision = parse_router_output(&raw);

        debug!(
            session_id = %cmd.session_id,
            raw_output = %raw,
            no_tool = decision.is_no_tool(),
            "Router output parsed"
        );

        Ok(decision)
    }
}
