//! Order lookup tool - reports the current status of an order.
//!
//! Accepts loosely formatted identifiers ("12345", "op-12345", "order #12345")
//! and normalizes them to `OP#####` before touching the order backend.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::domain::foundation::{SessionId, UserId, ValidationError};
use crate::domain::tools::{OrderId, ToolDefinition};
use crate::ports::{OrderStatusReader, ToolExecutor};

/// Registered name of the order lookup tool.
pub const ORDER_LOOKUP_TOOL: &str = "queryOrder";

const MISSING_ORDER_ID: &str =
    "The order number is missing. Please provide your order number, for example OP12345.";
const BLANK_ORDER_ID: &str = "The order number cannot be empty. Please provide a valid order number.";
const MALFORMED_ORDER_ID: &str =
    "The order number format is invalid. Please provide OP followed by 5 digits, for example OP12345.";

/// Executor for `queryOrder`.
pub struct OrderLookupTool {
    orders: Arc<dyn OrderStatusReader>,
}

impl OrderLookupTool {
    pub fn new(orders: Arc<dyn OrderStatusReader>) -> Self {
        Self { orders }
    }

    fn raw_order_id(params: &Value) -> Option<String> {
        match params.get("orderId")? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[async_trait]
impl ToolExecutor for OrderLookupTool {
    async fn execute(&self, params: &Value, _user: &UserId, session: &SessionId) -> String {
        let Some(raw) = Self::raw_order_id(params) else {
            return MISSING_ORDER_ID.to_string();
        };

        let order = match OrderId::parse(&raw) {
            Ok(order) => order,
            Err(ValidationError::EmptyField { .. }) => return BLANK_ORDER_ID.to_string(),
            Err(_) => return MALFORMED_ORDER_ID.to_string(),
        };

        match self.orders.status_of(&order).await {
            Ok(Some(status)) => format!("Order {} is currently: {}.", order, status),
            Ok(None) => format!("No order found with number {}.", order),
            Err(e) => {
                tracing::warn!(
                    session_id = %session,
                    order_id = %order,
                    error = %e,
                    "Order lookup failed"
                );
                format!(
                    "Sorry, order {} cannot be looked up right now. Please try again later.",
                    order
                )
            }
        }
    }
}

/// Builds the registry entry for the order lookup tool.
pub fn order_lookup_definition(orders: Arc<dyn OrderStatusReader>) -> ToolDefinition {
    ToolDefinition::new(
        ORDER_LOOKUP_TOOL,
        "Look up the current status of an order by its order number",
        json!({
            "type": "object",
            "required": ["tool", "params"],
            "additionalProperties": false,
            "properties": {
                "tool": { "type": "string", "enum": [ORDER_LOOKUP_TOOL] },
                "params": {
                    "type": "object",
                    "required": ["orderId"],
                    "additionalProperties": false,
                    "properties": {
                        "orderId": { "type": "string", "minLength": 1 }
                    }
                }
            }
        }),
        Arc::new(OrderLookupTool::new(orders)),
    )
    .with_permission("order:read")
}
