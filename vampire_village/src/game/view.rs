//! Per-observer projections of a snapshot.
//!
//! A snapshot holds everything, including secrets. Presentation layers that
//! put the session in front of a specific person should render a
//! [`GameView`] instead, which only carries what that person may know.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{
    entities::{Faction, GameEvent, Player, PlayerId, Role, Vision},
    errors::GameResult,
    state::{GameState, Phase},
};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub alive: bool,
    pub revealed: bool,
    /// Only set when the observer is allowed to know it.
    pub role: Option<Role>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GameView {
    pub observer: Option<PlayerId>,
    pub phase: Phase,
    pub day_count: u32,
    pub players: Vec<PlayerView>,
    pub current_turn: Option<PlayerId>,
    /// The observer's own pending night target.
    pub own_target: Option<PlayerId>,
    /// Seer results belonging to the observer.
    pub visions: Vec<Vision>,
    pub votes: BTreeMap<PlayerId, PlayerId>,
    pub winner: Option<Faction>,
    pub log: Vec<GameEvent>,
}

impl GameView {
    /// What everyone at the table may see.
    #[must_use]
    pub fn public(state: &GameState) -> Self {
        Self::build(state, None)
    }

    /// What `observer` may see.
    pub fn for_player(state: &GameState, observer: PlayerId) -> GameResult<Self> {
        let player = state.player(observer)?;
        Ok(Self::build(state, Some(player)))
    }

    fn build(state: &GameState, observer: Option<&Player>) -> Self {
        let ended = state.phase == Phase::Ended;
        let observer_is_vampire = observer.is_some_and(|o| o.is(Role::Vampire));

        let knows_role = |p: &Player| {
            let is_self = observer.is_some_and(|o| o.id == p.id);
            let fellow_vampire = observer_is_vampire && p.is(Role::Vampire);
            ended || p.revealed || is_self || fellow_vampire
        };

        let players = state
            .players
            .iter()
            .map(|p| PlayerView {
                id: p.id,
                name: p.name.clone(),
                alive: p.alive,
                revealed: p.revealed,
                role: if knows_role(p) { p.role } else { None },
            })
            .collect();

        let visions = observer
            .map(|o| {
                state
                    .visions
                    .iter()
                    .filter(|v| v.seer == o.id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        // At night the turn only ever rests on a Vampire, the Doctor or the
        // Seer, so it is shown only to those who already know that role.
        let current_turn = state
            .current_player()
            .filter(|p| state.phase != Phase::Night || knows_role(*p))
            .map(|p| p.id);

        // A Hunter's draw names them; it stays hidden until their role is known.
        let log = state
            .log
            .iter()
            .filter(|event| match event {
                GameEvent::HunterDraw { hunter, .. } => {
                    state.player(*hunter).is_ok_and(|p| knows_role(p))
                }
                _ => true,
            })
            .cloned()
            .collect();

        Self {
            observer: observer.map(|o| o.id),
            phase: state.phase,
            day_count: state.day_count,
            players,
            current_turn,
            own_target: observer.and_then(|o| o.action_target),
            visions,
            votes: state.votes.clone(),
            winner: state.winner,
            log,
        }
    }

    #[must_use]
    pub fn role_of(&self, id: PlayerId) -> Option<Role> {
        self.players.iter().find(|p| p.id == id).and_then(|p| p.role)
    }
}
