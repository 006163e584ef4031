//! Pre-game roster management. Callers are responsible for checking that
//! the game is still in setup.

use super::{
    constants::MAX_NAME_LENGTH,
    entities::{GameEvent, Player, PlayerId},
    errors::{GameResult, ValidationError},
    state::GameState,
};

/// Add a player named `name` (surrounding whitespace trimmed) under `id`.
///
/// Names are compared case-sensitively.
pub fn add_player(
    state: &GameState,
    name: &str,
    id: PlayerId,
    max_players: usize,
) -> GameResult<(GameState, Player)> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::BlankName.into());
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong {
            max: MAX_NAME_LENGTH,
        }
        .into());
    }
    if state.players.iter().any(|p| p.name == name) {
        return Err(ValidationError::DuplicateName(name.to_string()).into());
    }
    if state.players.len() >= max_players {
        return Err(ValidationError::RosterFull { max: max_players }.into());
    }

    let player = Player::new(id, name.to_string());
    let mut next = state.clone();
    next.players.push(player.clone());
    next.log.push(GameEvent::PlayerJoined(id));
    Ok((next, player))
}

pub fn remove_player(state: &GameState, id: PlayerId) -> GameResult<GameState> {
    let idx = state.index_of(id)?;
    let mut next = state.clone();
    next.players.remove(idx);
    next.log.push(GameEvent::PlayerLeft(id));
    Ok(next)
}
