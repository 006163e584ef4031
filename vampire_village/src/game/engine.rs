//! The phase state machine.
//!
//! [`transition`] is a pure function from a snapshot and an intent to the
//! next snapshot. [`GameEngine`] wraps it with the current snapshot, the
//! injectable sources, and snapshot subscribers.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};
use tokio::sync::mpsc;

use super::{
    assignment,
    constants::DEFAULT_SUBSCRIBER_CAPACITY,
    entities::{GameEvent, NightChoice, PlayerId},
    errors::{GameError, GameResult, ValidationError},
    night, roster,
    settings::GameSettings,
    sources::{IdSource, RandomSource, RngSource, UuidSource},
    state::{GameState, Phase, advance_turn},
    view::GameView,
    voting,
};

/// Everything a caller can ask the engine to do.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Intent {
    AddPlayer { name: String },
    RemovePlayer { id: PlayerId },
    StartGame,
    RevealRole { id: PlayerId },
    SubmitNightAction { actor: PlayerId, target: PlayerId },
    SkipNightAction { actor: PlayerId },
    StartVoting,
    SubmitVote { voter: PlayerId, target: PlayerId },
    Reset,
}

/// Payload-free discriminant of [`Intent`], used in error reports.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum IntentKind {
    AddPlayer,
    RemovePlayer,
    StartGame,
    RevealRole,
    SubmitNightAction,
    SkipNightAction,
    StartVoting,
    SubmitVote,
    Reset,
}

impl Intent {
    #[must_use]
    pub const fn kind(&self) -> IntentKind {
        match self {
            Self::AddPlayer { .. } => IntentKind::AddPlayer,
            Self::RemovePlayer { .. } => IntentKind::RemovePlayer,
            Self::StartGame => IntentKind::StartGame,
            Self::RevealRole { .. } => IntentKind::RevealRole,
            Self::SubmitNightAction { .. } => IntentKind::SubmitNightAction,
            Self::SkipNightAction { .. } => IntentKind::SkipNightAction,
            Self::StartVoting => IntentKind::StartVoting,
            Self::SubmitVote { .. } => IntentKind::SubmitVote,
            Self::Reset => IntentKind::Reset,
        }
    }

    /// The only phase in which this intent is legal, or `None` for intents
    /// that are legal everywhere.
    #[must_use]
    pub const fn legal_phase(&self) -> Option<Phase> {
        match self {
            Self::AddPlayer { .. } | Self::RemovePlayer { .. } | Self::StartGame => {
                Some(Phase::Setup)
            }
            Self::RevealRole { .. } => Some(Phase::FirstNight),
            Self::SubmitNightAction { .. } | Self::SkipNightAction { .. } => Some(Phase::Night),
            Self::StartVoting => Some(Phase::Day),
            Self::SubmitVote { .. } => Some(Phase::Voting),
            Self::Reset => None,
        }
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::AddPlayer => "add a player",
            Self::RemovePlayer => "remove a player",
            Self::StartGame => "start the game",
            Self::RevealRole => "reveal a role",
            Self::SubmitNightAction => "act at night",
            Self::SkipNightAction => "skip a night action",
            Self::StartVoting => "start voting",
            Self::SubmitVote => "vote",
            Self::Reset => "reset",
        };
        write!(f, "{repr}")
    }
}

/// Borrowed collaborators a transition may consult.
pub struct TransitionContext<'a> {
    pub settings: &'a GameSettings,
    pub rng: &'a mut dyn RandomSource,
    pub ids: &'a mut dyn IdSource,
}

/// Apply `intent` to `state`, producing the next snapshot.
///
/// On error the input snapshot is the current one; nothing was changed.
pub fn transition(
    state: &GameState,
    intent: &Intent,
    ctx: &mut TransitionContext<'_>,
) -> GameResult<GameState> {
    if let Some(phase) = intent.legal_phase()
        && phase != state.phase
    {
        return Err(GameError::PhaseViolation {
            intent: intent.kind(),
            phase: state.phase,
        });
    }

    match intent {
        Intent::AddPlayer { name } => {
            let id = ctx.ids.next_id();
            roster::add_player(state, name, id, ctx.settings.max_players).map(|(next, _)| next)
        }
        Intent::RemovePlayer { id } => roster::remove_player(state, *id),
        Intent::StartGame => start_game(state, ctx),
        Intent::RevealRole { id } => reveal_role(state, *id),
        Intent::SubmitNightAction { actor, target } => {
            let next = night::submit(state, *actor, NightChoice::Target(*target))?;
            Ok(close_night_if_complete(next, ctx))
        }
        Intent::SkipNightAction { actor } => {
            let next = night::submit(state, *actor, NightChoice::Skip)?;
            Ok(close_night_if_complete(next, ctx))
        }
        Intent::StartVoting => {
            let mut next = state.clone();
            voting::begin(&mut next);
            Ok(next)
        }
        Intent::SubmitVote { voter, target } => {
            let next = voting::submit(state, *voter, *target)?;
            if voting::is_complete(&next) {
                Ok(voting::resolve(&next, ctx.settings, &mut *ctx.rng))
            } else {
                Ok(next)
            }
        }
        Intent::Reset => Ok(GameState::new()),
    }
}

fn start_game(state: &GameState, ctx: &mut TransitionContext<'_>) -> GameResult<GameState> {
    let players = assignment::assign(&state.players, ctx.settings, &mut *ctx.rng)?;

    let mut next = state.clone();
    next.players = players;
    next.phase = Phase::FirstNight;
    next.day_count = 1;
    next.current_turn = (!next.players.is_empty()).then_some(0);
    next.log.push(GameEvent::RolesAssigned);
    Ok(next)
}

fn reveal_role(state: &GameState, id: PlayerId) -> GameResult<GameState> {
    let idx = state.index_of(id)?;
    if state.current_turn != Some(idx) {
        return Err(ValidationError::OutOfTurn.into());
    }

    let mut next = state.clone();
    next.players[idx].has_seen_role = true;
    next.log.push(GameEvent::RoleSeen(id));

    let everyone_seen = next.alive().all(|p| p.has_seen_role);
    if everyone_seen {
        night::begin(&mut next);
    } else {
        next.current_turn = Some(advance_turn(&next.players, idx));
    }
    Ok(next)
}

fn close_night_if_complete(next: GameState, ctx: &mut TransitionContext<'_>) -> GameState {
    if night::is_complete(&next) {
        night::resolve(&next, ctx.settings, &mut *ctx.rng)
    } else {
        next
    }
}

/// The authoritative game session.
///
/// Holds the current snapshot and applies intents one at a time. Every
/// successful intent publishes exactly one new snapshot to each subscriber.
pub struct GameEngine {
    state: Arc<GameState>,
    settings: GameSettings,
    rng: Box<dyn RandomSource>,
    ids: Box<dyn IdSource>,
    subscribers: Vec<mpsc::Sender<Arc<GameState>>>,
    subscriber_capacity: usize,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEngine")
            .field("state", &self.state)
            .field("settings", &self.settings)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl GameEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::with_sources(
            GameSettings::default(),
            Box::new(RngSource::from_entropy()),
            Box::new(UuidSource),
        )
    }

    #[must_use]
    pub fn with_sources(
        settings: GameSettings,
        rng: Box<dyn RandomSource>,
        ids: Box<dyn IdSource>,
    ) -> Self {
        Self {
            state: Arc::new(GameState::new()),
            settings,
            rng,
            ids,
            subscribers: Vec::new(),
            subscriber_capacity: DEFAULT_SUBSCRIBER_CAPACITY,
        }
    }

    #[must_use]
    pub fn with_subscriber_capacity(mut self, capacity: usize) -> Self {
        self.subscriber_capacity = capacity.max(1);
        self
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> Arc<GameState> {
        Arc::clone(&self.state)
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// What `player` is allowed to see right now.
    pub fn view_for(&self, player: PlayerId) -> GameResult<GameView> {
        GameView::for_player(&self.state, player)
    }

    #[must_use]
    pub fn can_start_game(&self) -> bool {
        self.state
            .can_start_game(self.settings.min_players, self.settings.max_players)
    }

    /// Apply one intent. Returns the new snapshot, or the reason it was
    /// rejected (in which case the current snapshot is unchanged).
    pub fn apply(&mut self, intent: Intent) -> GameResult<Arc<GameState>> {
        let mut ctx = TransitionContext {
            settings: &self.settings,
            rng: self.rng.as_mut(),
            ids: self.ids.as_mut(),
        };

        let next = match transition(&self.state, &intent, &mut ctx) {
            Ok(next) => next,
            Err(e) => {
                warn!("Rejected {:?} during {}: {e}", intent.kind(), self.state.phase);
                return Err(e);
            }
        };

        if next.phase != self.state.phase {
            info!(
                "Phase {} -> {} (day {})",
                self.state.phase, next.phase, next.day_count
            );
        } else {
            debug!("Applied {:?} during {}", intent.kind(), next.phase);
        }

        self.state = Arc::new(next);
        self.publish();
        Ok(self.state())
    }

    /// Receive every future snapshot.
    pub fn subscribe(&mut self) -> mpsc::Receiver<Arc<GameState>> {
        let (sender, receiver) = mpsc::channel(self.subscriber_capacity);
        self.subscribers.push(sender);
        debug!("Snapshot subscriber added ({} total)", self.subscribers.len());
        receiver
    }

    fn publish(&mut self) {
        let snapshot = &self.state;
        self.subscribers
            .retain(|sender| match sender.try_send(Arc::clone(snapshot)) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!("Subscriber channel full, dropping snapshot");
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    debug!("Subscriber disconnected, removing");
                    false
                }
            });
    }
}
