//! Tool Executor Port - Interface for side-effecting tools.
//!
//! An executor receives parameters that have already passed schema
//! validation and rate limiting.
//!
//! # Contract
//!
//! `execute` is infallible by signature. Any internal failure (backing
//! store down, malformed identifier, unknown record) must be turned into a
//! human-readable string so the conversation is never interrupted.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::foundation::{SessionId, UserId};

/// Port for executing a single registered tool.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute the tool and return the text shown to the user.
    async fn execute(&self, params: &Value, user: &UserId, session: &SessionId) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoExecutor;

    #[async_trait]
    impl ToolExecutor for EchoExecutor {
        async fn execute(&self, params: &Value, user: &UserId, _session: &SessionId) -> String {
            format!("{} asked for {}", user, params)
        }
    }

    #[tokio::test]
    async fn executor_returns_plain_text() {
        let executor: Box<dyn ToolExecutor> = Box::new(EchoExecutor);
        let text = executor
            .execute(
                &json!({"orderId": "1"}),
                &UserId::new("u").unwrap(),
                &SessionId::new("s").unwrap(),
            )
            .await;
        assert_eq!(text, "u asked for {\"orderId\":\"1\"}");
    }

    #[test]
    fn tool_executor_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ToolExecutor>();
    }
}
