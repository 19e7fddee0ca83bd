//! HandleMessageHandler - single entry point for a user message.
//!
//! ```text
//! Start -> Routing -> ToolValidating -> ToolRateLimiting -> ToolExecuting -> Done
//!                  \-> Answering -> Done
//! ```
//!
//! Any failure on the tool branch moves to `Answering`. Failures of the
//! generation or retrieval collaborators end in a fixed apology. The caller
//! always gets exactly one string and there are no retries.

use std::sync::Arc;

use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::domain::foundation::SessionId;
use crate::domain::knowledge::RagResponse;
use crate::domain::routing::RoutingDecision;
use crate::ports::AIError;

use super::answer_question::{AnswerError, AnswerQuestionCommand, GroundedAnswerEngine};
use super::dispatch_tool::{DispatchToolCommand, ToolDispatcher};
use super::route_message::{DecisionRouter, RouteMessageCommand};

/// Reply when a collaborator fails and no answer can be produced.
pub const SERVICE_UNAVAILABLE: &str =
    "Sorry, the service is temporarily unavailable. Please try again later.";

/// Reply when the knowledge base returns an empty answer.
pub const NOT_COVERED: &str = "Sorry, this question is not covered by the knowledge base yet. Please contact HR or the responsible owner.";

/// Command to handle one user message
#[derive(Debug, Clone)]
pub struct HandleMessageCommand {
    pub session_id: SessionId,
    pub message: String,
    pub trace_id: String,
}

impl HandleMessageCommand {
    pub fn new(session_id: SessionId, message: impl Into<String>) -> Self {
        Self {
            session_id,
            message: message.into(),
            trace_id: Uuid::new_v4().to_string(),
        }
    }
}

/// Failures that end the conversation turn with an apology
#[derive(Debug, Clone, thiserror::Error)]
pub enum OrchestratorError {
    #[error("Routing failed: {0}")]
    Routing(#[from] AIError),

    #[error(transparent)]
    Answer(#[from] AnswerError),
}

/// Composes router, tool dispatcher and answer engine.
pub struct MessageOrchestrator {
    router: DecisionRouter,
    dispatcher: ToolDispatcher,
    engine: Arc<GroundedAnswerEngine>,
}

impl MessageOrchestrator {
    pub fn new(
        router: DecisionRouter,
        dispatcher: ToolDispatcher,
        engine: Arc<GroundedAnswerEngine>,
    ) -> Self {
        Self {
            router,
            dispatcher,
            engine,
        }
    }

    /// Handles a message. Never fails; errors become an apology string.
    pub async fn handle(&self, cmd: HandleMessageCommand) -> String {
        let session_id = cmd.session_id.clone();
        let trace_id = cmd.trace_id.clone();

        match self.try_handle(cmd).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(
                    session_id = %session_id,
                    trace_id = %trace_id,
                    error = %e,
                    "Message handling failed"
                );
                SERVICE_UNAVAILABLE.to_string()
            }
        }
    }

    /// Structured knowledge-base answer for callers that render citations.
    pub async fn answer(
        &self,
        question: impl Into<String>,
        session_id: SessionId,
    ) -> Result<RagResponse, AnswerError> {
        self.engine
            .handle(AnswerQuestionCommand::new(session_id, question))
            .await
    }

    async fn try_handle(&self, cmd: HandleMessageCommand) -> Result<String, OrchestratorError> {
        debug!(session_id = %cmd.session_id, trace_id = %cmd.trace_id, "Routing message");

        let decision = self
            .router
            .handle(RouteMessageCommand {
                session_id: cmd.session_id.clone(),
                message: cmd.message.clone(),
                trace_id: cmd.trace_id.clone(),
            })
            .await?;

        if let RoutingDecision::Invoke(call) = decision {
            let tool = call.tool.clone();
            debug!(session_id = %cmd.session_id, tool = %tool, "Entering tool branch");

            match self
                .dispatcher
                .handle(DispatchToolCommand {
                    session_id: cmd.session_id.clone(),
                    call,
                })
                .await
            {
                Ok(outcome) => return Ok(outcome.into_reply()),
                Err(e) => warn!(
                    session_id = %cmd.session_id,
                    tool = %tool,
                    error = %e,
                    "Tool branch failed, falling back to knowledge base"
                ),
            }
        }

        debug!(session_id = %cmd.session_id, "Answering from knowledge base");
        let response = self
            .engine
            .handle(
                AnswerQuestionCommand::new(cmd.session_id, cmd.message).with_trace_id(cmd.trace_id),
            )
            .await?;

        if response.answer.trim().is_empty() {
            return Ok(NOT_COVERED.to_string());
        }
        Ok(response.answer)
    }
}
