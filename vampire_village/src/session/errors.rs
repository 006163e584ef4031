//! Session error types.

use thiserror::Error;

use crate::game::GameError;

/// Errors surfaced through a [`SessionHandle`](super::SessionHandle)
#[derive(Debug, Error)]
pub enum SessionError {
    /// The game rejected the intent
    #[error(transparent)]
    Game(#[from] GameError),

    /// The actor has stopped and no longer accepts messages
    #[error("Session is closed")]
    Closed,
}

impl SessionError {
    /// The game error, if the actor was reachable and rejected the request
    #[must_use]
    pub fn game_error(&self) -> Option<&GameError> {
        match self {
            SessionError::Game(e) => Some(e),
            SessionError::Closed => None,
        }
    }
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
