//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain logic and coordinates between ports.

mod answer_cache;
pub mod handlers;

pub use answer_cache::AnswerCache;
pub use handlers::{
    AnswerEngineConfig, AnswerError, AnswerQuestionCommand, DecisionRouter, DispatchError,
    DispatchOutcome, DispatchToolCommand, GroundedAnswerEngine, HandleMessageCommand,
    MessageOrchestrator, OrchestratorError, RouteMessageCommand, ToolDispatcher,
};
