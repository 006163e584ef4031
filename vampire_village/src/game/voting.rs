//! Day vote collection and tally.

use log::debug;
use std::collections::{BTreeMap, HashMap};

use super::{
    entities::{GameEvent, PlayerId},
    errors::{GameResult, ValidationError},
    hunter, night,
    settings::{GameSettings, TieBreakPolicy},
    sources::RandomSource,
    state::{GameState, Phase},
    win,
};

/// Open the vote.
pub(crate) fn begin(state: &mut GameState) {
    state.phase = Phase::Voting;
    state.votes.clear();
    state.current_turn = None;
    state.log.push(GameEvent::VotingOpened);
}

pub fn submit(state: &GameState, voter: PlayerId, target: PlayerId) -> GameResult<GameState> {
    if !state.player(voter)?.alive {
        return Err(ValidationError::DeadActor.into());
    }
    if !state.player(target)?.alive {
        return Err(ValidationError::DeadTarget.into());
    }
    if state.votes.contains_key(&voter) {
        return Err(ValidationError::AlreadyVoted.into());
    }

    let mut next = state.clone();
    next.votes.insert(voter, target);
    debug!(
        "Day {}: {voter} voted for {target} ({}/{})",
        next.day_count,
        next.votes.len(),
        next.alive_count()
    );
    Ok(next)
}

/// Whether every living player has voted exactly once.
#[must_use]
pub fn is_complete(state: &GameState) -> bool {
    state.alive().all(|p| state.votes.contains_key(&p.id))
}

/// Targets sharing the highest vote count, in id order.
#[must_use]
pub fn leaders(votes: &BTreeMap<PlayerId, PlayerId>) -> Vec<PlayerId> {
    let mut counts: HashMap<PlayerId, usize> = HashMap::new();
    for target in votes.values() {
        *counts.entry(*target).or_default() += 1;
    }

    let Some(max) = counts.values().copied().max() else {
        return Vec::new();
    };
    let mut top: Vec<PlayerId> = counts
        .into_iter()
        .filter_map(|(target, count)| (count == max).then_some(target))
        .collect();
    top.sort_unstable();
    top
}

/// Tally the votes into the next snapshot.
///
/// Ends in the next night with the day count advanced, or in the ended phase
/// if the elimination settles the game.
pub fn resolve(
    state: &GameState,
    settings: &GameSettings,
    rng: &mut dyn RandomSource,
) -> GameState {
    let mut next = state.clone();
    let top = leaders(&state.votes);

    let eliminated = match top.as_slice() {
        [] => None,
        [single] => Some(*single),
        tied => {
            next.log.push(GameEvent::VoteTied(tied.to_vec()));
            match settings.tie_break {
                TieBreakPolicy::NoElimination => None,
                TieBreakPolicy::RandomAmongTied => Some(tied[rng.index(tied.len())]),
            }
        }
    };

    if let Some(target) = eliminated
        && let Ok(player) = next.player_mut(target)
    {
        player.alive = false;
        player.revealed = true;
        let event = player.role.map(|role| GameEvent::PlayerEliminated {
            player: target,
            role,
        });
        next.log.extend(event);
        hunter::retaliate(&mut next, &[target], settings.hunter_retaliation_chance, rng);
    }

    next.votes.clear();

    if win::settle(&mut next).is_none() {
        next.day_count += 1;
        night::begin(&mut next);
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{
        entities::{Faction, Player, Role},
        errors::GameError,
        sources::{IdSource, ScriptedSource, SequentialIds},
    };

    fn voting_state(roles: &[Role]) -> GameState {
        let mut ids = SequentialIds::default();
        let mut state = GameState::new();
        for (i, &role) in roles.iter().enumerate() {
            let mut p = Player::new(ids.next_id(), format!("P{i}"));
            p.role = Some(role);
            state.players.push(p);
        }
        begin(&mut state);
        state
    }

    fn ids(state: &GameState) -> Vec<PlayerId> {
        state.players.iter().map(|p| p.id).collect()
    }

    const SIX: [Role; 6] = [
        Role::Vampire,
        Role::Villager,
        Role::Villager,
        Role::Villager,
        Role::Villager,
        Role::Vampire,
    ];

    #[test]
    fn test_leaders() {
        let p = ids(&voting_state(&SIX));
        let votes = BTreeMap::from([(p[0], p[1]), (p[2], p[1]), (p[3], p[4])]);
        assert_eq!(leaders(&votes), vec![p[1]]);

        let votes = BTreeMap::from([(p[0], p[1]), (p[2], p[4])]);
        assert_eq!(leaders(&votes), vec![p[1], p[4]]);

        assert!(leaders(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_dead_players_cannot_vote_or_be_voted() {
        let mut state = voting_state(&SIX);
        state.players[2].alive = false;
        let p = ids(&state);

        assert_eq!(
            submit(&state, p[2], p[1]).unwrap_err(),
            GameError::from(ValidationError::DeadActor)
        );
        assert_eq!(
            submit(&state, p[1], p[2]).unwrap_err(),
            GameError::from(ValidationError::DeadTarget)
        );
    }

    #[test]
    fn test_one_vote_each() {
        let state = voting_state(&SIX);
        let p = ids(&state);
        let state = submit(&state, p[0], p[1]).unwrap();
        assert_eq!(
            submit(&state, p[0], p[2]).unwrap_err(),
            GameError::from(ValidationError::AlreadyVoted)
        );
    }

    #[test]
    fn test_majority_is_eliminated_and_revealed() {
        let state = voting_state(&SIX);
        let p = ids(&state);
        let mut state = state;
        for (voter, target) in [(0, 1), (1, 5), (2, 5), (3, 5), (4, 1), (5, 1)] {
            state = submit(&state, p[voter], p[target]).unwrap();
        }
        // 3 votes for P1, 3 votes for P5: tie, nobody leaves.
        assert!(is_complete(&state));
        let next = resolve(&state, &GameSettings::default(), &mut ScriptedSource::new());
        assert_eq!(next.alive_count(), 6);
        assert_eq!(next.log.last(), Some(&GameEvent::NightFell { night: 2 }));

        let mut state = voting_state(&SIX);
        for (voter, target) in [(0, 1), (1, 5), (2, 5), (3, 5), (4, 1), (5, 2)] {
            state = submit(&state, p[voter], p[target]).unwrap();
        }
        let next = resolve(&state, &GameSettings::default(), &mut ScriptedSource::new());
        let out = next.player(p[5]).unwrap();
        assert!(!out.alive);
        assert!(out.revealed);
        assert!(next.log.contains(&GameEvent::PlayerEliminated {
            player: p[5],
            role: Role::Vampire
        }));
        assert_eq!(next.phase, Phase::Night);
        assert_eq!(next.day_count, 2);
        assert!(next.votes.is_empty());
    }

    #[test]
    fn test_random_tie_break_picks_one_of_the_tied() {
        let state = voting_state(&SIX);
        let p = ids(&state);
        let mut state = state;
        for (voter, target) in [(0, 1), (1, 5), (2, 5), (3, 5), (4, 1), (5, 1)] {
            state = submit(&state, p[voter], p[target]).unwrap();
        }
        let settings = GameSettings {
            tie_break: TieBreakPolicy::RandomAmongTied,
            ..GameSettings::default()
        };
        let mut rng = ScriptedSource::new().with_indices([1]);
        let next = resolve(&state, &settings, &mut rng);

        assert!(!next.player(p[5]).unwrap().alive);
        assert!(next.log.contains(&GameEvent::VoteTied(vec![p[1], p[5]])));
    }

    #[test]
    fn test_eliminating_last_vampire_ends_game() {
        let mut state = voting_state(&SIX);
        state.players[0].alive = false;
        let p = ids(&state);
        for voter in 1..6 {
            state = submit(&state, p[voter], p[5]).unwrap();
        }
        let next = resolve(&state, &GameSettings::default(), &mut ScriptedSource::new());
        assert_eq!(next.phase, Phase::Ended);
        assert_eq!(next.winner, Some(Faction::Villagers));
        assert_eq!(next.day_count, 1);
    }
}
