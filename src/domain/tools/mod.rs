//! Tools module - Callable tools and their registry.

mod order_id;
mod tool_call;
mod tool_definition;
mod tool_registry;

pub use order_id::OrderId;
pub use tool_call::ToolCallRequest;
pub use tool_definition::ToolDefinition;
pub use tool_registry::{RegistryError, ToolRegistry};
