//! Hunter retaliation, shared by night and vote resolution.

use std::collections::VecDeque;

use log::debug;

use super::{
    entities::{GameEvent, PlayerId, Role},
    sources::RandomSource,
    state::GameState,
};

/// Give every Hunter in `dead` one draw at taking someone down with them.
///
/// A draw below `chance` kills a uniformly chosen living player other than
/// the Hunter. Every draw is logged, hits and misses alike, so the outcome
/// can be audited and replayed.
pub fn retaliate(
    state: &mut GameState,
    dead: &[PlayerId],
    chance: f64,
    rng: &mut dyn RandomSource,
) {
    let mut hunters: VecDeque<PlayerId> = dead
        .iter()
        .copied()
        .filter(|&id| is_hunter(state, id))
        .collect();

    while let Some(hunter) = hunters.pop_front() {
        let roll = rng.unit();
        let victim = if roll < chance {
            let candidates: Vec<PlayerId> = state
                .alive()
                .filter(|p| p.id != hunter)
                .map(|p| p.id)
                .collect();
            (!candidates.is_empty()).then(|| candidates[rng.index(candidates.len())])
        } else {
            None
        };

        debug!("Hunter {hunter} rolled {roll:.3}, victim {victim:?}");
        state.log.push(GameEvent::HunterDraw {
            hunter,
            roll,
            victim,
        });

        if let Some(victim) = victim {
            if let Some(player) = state.players.iter_mut().find(|p| p.id == victim) {
                player.alive = false;
            }
            state.log.push(GameEvent::PlayerKilled(victim));
            if is_hunter(state, victim) {
                hunters.push_back(victim);
            }
        }
    }
}

fn is_hunter(state: &GameState, id: PlayerId) -> bool {
    state.player(id).is_ok_and(|p| p.is(Role::Hunter))
}
