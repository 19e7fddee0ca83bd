//! Identity Resolver Port - maps a session to the acting user.

use async_trait::async_trait;

use crate::domain::foundation::{SessionId, UserId};

/// Errors that can occur while resolving identity
#[derive(Debug, Clone, thiserror::Error)]
pub enum IdentityError {
    #[error("No user bound to session: {0}")]
    UnknownSession(String),

    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Port for resolving which user a session belongs to.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, session: &SessionId) -> Result<UserId, IdentityError>;
}
