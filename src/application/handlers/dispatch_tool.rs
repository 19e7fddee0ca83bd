//! DispatchToolHandler - run a routed tool call through its guards.
//!
//! Order of checks:
//! 1. Registry lookup
//! 2. Schema validation of the `{tool, params}` envelope
//! 3. Per-(session, tool) rate limit
//! 4. Identity resolution
//! 5. Executor
//!
//! Every error variant means "this message is not a tool call after all";
//! the orchestrator answers from the knowledge base instead. A rate-limit
//! denial is not an error: the user gets the cooldown message.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::foundation::SessionId;
use crate::domain::tools::{ToolCallRequest, ToolRegistry};
use crate::ports::{
    IdentityError, IdentityResolver, RateLimitError, RateLimitKey, RateLimitResult,
    SchemaValidationError, ToolRateLimiter, ToolSchemaValidator,
};

/// Command to dispatch a routed tool call
#[derive(Debug, Clone)]
pub struct DispatchToolCommand {
    pub session_id: SessionId,
    pub call: ToolCallRequest,
}

/// What the user gets back from the tool path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The executor ran; its text is returned verbatim.
    Executed(String),
    /// Over quota; carries the cooldown message.
    RateLimited(String),
}

impl DispatchOutcome {
    pub fn into_reply(self) -> String {
        match self {
            DispatchOutcome::Executed(text) | DispatchOutcome::RateLimited(text) => text,
        }
    }
}

/// Error type for tool dispatch
#[derive(Debug, Clone, thiserror::Error)]
pub enum DispatchError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid parameters for tool {tool}: {source}")]
    InvalidParameters {
        tool: String,
        #[source]
        source: SchemaValidationError,
    },

    #[error("Rate limiter unavailable: {0}")]
    RateLimiterUnavailable(#[from] RateLimitError),

    #[error("Identity unavailable: {0}")]
    IdentityUnavailable(#[from] IdentityError),
}

/// Handler for guarded tool execution
pub struct ToolDispatcher {
    registry: Arc<ToolRegistry>,
    validator: Arc<dyn ToolSchemaValidator>,
    limiter: Arc<dyn ToolRateLimiter>,
    identity: Arc<dyn IdentityResolver>,
}

impl ToolDispatcher {
    pub fn new(
        registry: Arc<ToolRegistry>,
        validator: Arc<dyn ToolSchemaValidator>,
        limiter: Arc<dyn ToolRateLimiter>,
        identity: Arc<dyn IdentityResolver>,
    ) -> Self {
        Self {
            registry,
            validator,
            limiter,
            identity,
        }
    }

    pub async fn handle(&self, cmd: DispatchToolCommand) -> Result<DispatchOutcome, DispatchError> {
        let DispatchToolCommand { session_id, call } = cmd;

        // 1. Lookup
        let tool = self
            .registry
            .lookup(&call.tool)
            .ok_or_else(|| DispatchError::UnknownTool(call.tool.clone()))?;

        // 2. Validate
        self.validator
            .validate(&call.envelope(), tool.parameters_schema())
            .map_err(|source| DispatchError::InvalidParameters {
                tool: call.tool.clone(),
                source,
            })?;

        // 3. Rate limit
        let key = RateLimitKey::new(session_id.clone(), tool.name());
        if let RateLimitResult::Denied(denied) = self.limiter.check(&key).await? {
            info!(
                session_id = %session_id,
                tool = %tool.name(),
                count = denied.count,
                limit = denied.limit,
                "Tool call rate limited"
            );
            return Ok(DispatchOutcome::RateLimited(denied.cooldown_message()));
        }

        // 4. Identity
        let user = self.identity.resolve(&session_id).await?;

        // 5. Execute
        debug!(session_id = %session_id, tool = %tool.name(), "Executing tool");
        let reply = tool.executor().execute(&call.params, &user, &session_id).await;

        Ok(DispatchOutcome::Executed(reply))
    }
}
