//! Identity adapters.

mod session_identity;

pub use session_identity::SessionIdentityResolver;
