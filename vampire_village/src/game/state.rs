//! Immutable game snapshots.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

use super::{
    entities::{Faction, GameEvent, NightChoice, Player, PlayerId, Vision},
    errors::{GameError, GameResult},
};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Phase {
    #[default]
    Setup,
    FirstNight,
    Night,
    Day,
    Voting,
    Ended,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Setup => "setup",
            Self::FirstNight => "first night",
            Self::Night => "night",
            Self::Day => "day",
            Self::Voting => "voting",
            Self::Ended => "ended",
        };
        write!(f, "{repr}")
    }
}

/// One complete, self-consistent picture of a session.
///
/// Snapshots are never mutated after they are published; every transition
/// clones the previous snapshot into a new one.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GameState {
    pub phase: Phase,
    /// Seating order. Turn order follows this list.
    pub players: Vec<Player>,
    pub day_count: u32,
    pub current_turn: Option<usize>,
    /// Voter to target. Only populated while voting.
    pub votes: BTreeMap<PlayerId, PlayerId>,
    /// Actor to choice. Only populated at night.
    pub night_actions: BTreeMap<PlayerId, NightChoice>,
    /// Who the Doctor protected during the previous night.
    pub last_protected: Option<PlayerId>,
    /// Seer results. Each entry is private to its Seer.
    pub visions: Vec<Vision>,
    /// Set once; only a reset clears it.
    pub winner: Option<Faction>,
    pub log: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Setup,
            players: Vec::new(),
            day_count: 1,
            current_turn: None,
            votes: BTreeMap::new(),
            night_actions: BTreeMap::new(),
            last_protected: None,
            visions: Vec::new(),
            winner: None,
            log: Vec::new(),
        }
    }

    pub fn index_of(&self, id: PlayerId) -> GameResult<usize> {
        self.players
            .iter()
            .position(|p| p.id == id)
            .ok_or(GameError::UnknownPlayer(id))
    }

    pub fn player(&self, id: PlayerId) -> GameResult<&Player> {
        self.index_of(id).map(|idx| &self.players[idx])
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> GameResult<&mut Player> {
        let idx = self.index_of(id)?;
        Ok(&mut self.players[idx])
    }

    pub fn alive(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.alive)
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    /// Player whose turn it currently is.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.current_turn.and_then(|idx| self.players.get(idx))
    }

    /// Alive players that owe a night action.
    pub fn night_actors(&self) -> impl Iterator<Item = &Player> {
        self.alive().filter(|p| p.acts_at_night())
    }

    /// Alive night actors that haven't submitted anything yet.
    pub fn pending_night_actors(&self) -> impl Iterator<Item = &Player> {
        self.night_actors()
            .filter(|p| !self.night_actions.contains_key(&p.id))
    }

    #[must_use]
    pub fn can_start_game(&self, min_players: usize, max_players: usize) -> bool {
        self.phase == Phase::Setup && (min_players..=max_players).contains(&self.players.len())
    }

    /// Serialize the snapshot for an observer that speaks JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Next index after `current` (wrapping) whose player is alive.
///
/// Returns `current` unchanged when nobody else is alive.
#[must_use]
pub fn advance_turn(players: &[Player], current: usize) -> usize {
    let len = players.len();
    if len == 0 {
        return current;
    }

    (1..len)
        .map(|step| (current + step) % len)
        .find(|&idx| players[idx].alive)
        .unwrap_or(current)
}

/// First index at or after `from` (wrapping) matching `pred`.
pub(crate) fn find_from(
    players: &[Player],
    from: usize,
    pred: impl Fn(&Player) -> bool,
) -> Option<usize> {
    let len = players.len();
    (0..len)
        .map(|step| (from + step) % len)
        .find(|&idx| pred(&players[idx]))
}
