//! Tool executors available to the router.

mod order_lookup;

pub use order_lookup::{order_lookup_definition, OrderLookupTool, ORDER_LOOKUP_TOOL};
