//! Win evaluation.

use log::info;

use super::{
    entities::{Faction, GameEvent, Player, Role},
    state::{GameState, Phase},
};

/// Decide whether the living players settle the game.
///
/// No living Vampires means the Villagers win; Vampires matching or
/// outnumbering everyone else means the Vampires win.
#[must_use]
pub fn evaluate(players: &[Player]) -> Option<Faction> {
    let alive = players.iter().filter(|p| p.alive).count();
    let vampires = players
        .iter()
        .filter(|p| p.alive && p.is(Role::Vampire))
        .count();
    let others = alive - vampires;

    if vampires == 0 {
        Some(Faction::Villagers)
    } else if vampires >= others {
        Some(Faction::Vampires)
    } else {
        None
    }
}

/// Evaluate `state` and end the game if a faction has won.
///
/// A winner that is already set is kept as is.
pub fn settle(state: &mut GameState) -> Option<Faction> {
    if state.winner.is_some() {
        return state.winner;
    }

    let winner = evaluate(&state.players)?;
    info!("Game over on day {}: the {winner} won", state.day_count);
    state.winner = Some(winner);
    state.phase = Phase::Ended;
    state.current_turn = None;
    state.log.push(GameEvent::GameWon(winner));
    Some(winner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::sources::{IdSource, SequentialIds};

    fn players(seats: &[(Role, bool)]) -> Vec<Player> {
        let mut ids = SequentialIds::default();
        seats
            .iter()
            .map(|&(role, alive)| {
                let mut p = Player::new(ids.next_id(), role.to_string());
                p.role = Some(role);
                p.alive = alive;
                p
            })
            .collect()
    }

    #[test]
    fn test_villagers_win_without_vampires() {
        let p = players(&[
            (Role::Vampire, false),
            (Role::Vampire, false),
            (Role::Villager, true),
        ]);
        assert_eq!(evaluate(&p), Some(Faction::Villagers));
    }

    #[test]
    fn test_vampires_win_at_parity() {
        let p = players(&[
            (Role::Vampire, true),
            (Role::Seer, true),
            (Role::Villager, false),
        ]);
        assert_eq!(evaluate(&p), Some(Faction::Vampires));
    }

    #[test]
    fn test_game_continues() {
        let p = players(&[
            (Role::Vampire, true),
            (Role::Seer, true),
            (Role::Villager, true),
        ]);
        assert_eq!(evaluate(&p), None);
    }

    #[test]
    fn test_settle_keeps_existing_winner() {
        let mut state = GameState::new();
        state.players = players(&[(Role::Vampire, true), (Role::Villager, true)]);
        assert_eq!(settle(&mut state), Some(Faction::Vampires));
        assert_eq!(state.phase, Phase::Ended);

        // Even if the board changes, the winner sticks.
        state.players[0].alive = false;
        assert_eq!(settle(&mut state), Some(Faction::Vampires));
        assert_eq!(state.winner, Some(Faction::Vampires));
        assert_eq!(state.log, vec![GameEvent::GameWon(Faction::Vampires)]);
    }
}
