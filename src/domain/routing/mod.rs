//! Routing module - Tool-or-knowledge-base classification.

mod decision;
mod router_prompt;

pub use decision::{parse_router_output, RoutingDecision};
pub use router_prompt::build_router_prompt;
