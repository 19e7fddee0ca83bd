//! Session-bound identity: the session id doubles as the user id.
//!
//! There is no login in front of the message core yet, so every session is
//! its own user. Replace with a real resolver once sessions are bound to
//! authenticated accounts.

use async_trait::async_trait;

use crate::domain::foundation::{SessionId, UserId};
use crate::ports::{IdentityError, IdentityResolver};

/// Resolver that maps each session to a user with the same id.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionIdentityResolver;

impl SessionIdentityResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IdentityResolver for SessionIdentityResolver {
    async fn resolve(&self, session: &SessionId) -> Result<UserId, IdentityError> {
        UserId::new(session.as_str()).map_err(|e| IdentityError::UnknownSession(e.to_string()))
    }
}
