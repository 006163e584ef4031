//! Game error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    engine::IntentKind,
    entities::{PlayerId, Role},
    state::Phase,
};

/// Errors returned when an intent is rejected. The snapshot the intent was
/// applied to is never modified.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error("can't {intent} during {phase}")]
    PhaseViolation { intent: IntentKind, phase: Phase },
    #[error("can't start game: {0}")]
    SetupInvalid(#[from] SetupError),
    #[error("doctor protected {target} last night")]
    RepeatedProtection { target: PlayerId },
    #[error("player {0} does not exist")]
    UnknownPlayer(PlayerId),
}

#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum ValidationError {
    #[error("name can't be blank")]
    BlankName,
    #[error("name {0:?} is already taken")]
    DuplicateName(String),
    #[error("name is longer than {max} characters")]
    NameTooLong { max: usize },
    #[error("roster is full ({max} players)")]
    RosterFull { max: usize },
    #[error("not your turn")]
    OutOfTurn,
    #[error("dead players can't act")]
    DeadActor,
    #[error("can't target a dead player")]
    DeadTarget,
    #[error("{0} has no night action")]
    NoNightAction(Role),
    #[error("already acted tonight")]
    AlreadyActed,
    #[error("already voted")]
    AlreadyVoted,
    #[error("vampires can't attack a vampire")]
    VampireTarget,
}

/// Reasons a roster can't be dealt roles.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum SetupError {
    #[error("need {min}-{max} players, have {count}")]
    RosterSize {
        count: usize,
        min: usize,
        max: usize,
    },
    #[error("{count} {role}(s) outside allowed range {min}-{max}")]
    RoleBounds {
        role: Role,
        count: usize,
        min: usize,
        max: usize,
    },
}

/// Result type for game operations
pub type GameResult<T> = Result<T, GameError>;
