//! Application handlers.
//!
//! One handler per use case, each taking a command and returning a result:
//! - `DecisionRouter` - tool or knowledge base
//! - `ToolDispatcher` - guarded tool execution
//! - `GroundedAnswerEngine` - cited answers from retrieved passages
//! - `MessageOrchestrator` - composes the three

mod answer_question;
mod dispatch_tool;
mod handle_message;
mod route_message;

pub use answer_question::{
    AnswerEngineConfig, AnswerError, AnswerQuestionCommand, GroundedAnswerEngine, DEFAULT_TOP_K,
    NEGATIVE_CACHE_TTL,
};
pub use dispatch_tool::{DispatchError, DispatchOutcome, DispatchToolCommand, ToolDispatcher};
pub use handle_message::{
    HandleMessageCommand, MessageOrchestrator, OrchestratorError, NOT_COVERED,
    SERVICE_UNAVAILABLE,
};
pub use route_message::{DecisionRouter, RouteMessageCommand};
