//! Night action collection and resolution.
//!
//! Actions are collected one at a time from alive players whose role acts at
//! night. Once every such player has submitted an action or an explicit skip,
//! the night resolves in a fixed order regardless of submission order:
//!
//! 1. Seers learn whether their target is a Vampire (privately)
//! 2. The Doctor's protection is recorded
//! 3. Every unprotected Vampire target dies
//! 4. Dying Hunters retaliate

use log::debug;

use super::{
    entities::{GameEvent, NightChoice, PlayerId, Role, Vision},
    errors::{GameError, GameResult, ValidationError},
    hunter,
    settings::GameSettings,
    sources::RandomSource,
    state::{GameState, Phase, find_from},
    win,
};

/// Put `state` into the night phase with fresh accumulators.
pub(crate) fn begin(state: &mut GameState) {
    state.phase = Phase::Night;
    state.night_actions.clear();
    for player in &mut state.players {
        player.action_target = None;
    }
    state.current_turn = find_from(&state.players, 0, |p| p.alive && p.acts_at_night());
    state.log.push(GameEvent::NightFell {
        night: state.day_count,
    });
}

/// Record `actor`'s choice for tonight.
pub fn submit(state: &GameState, actor: PlayerId, choice: NightChoice) -> GameResult<GameState> {
    let actor_player = state.player(actor)?;
    if !actor_player.alive {
        return Err(ValidationError::DeadActor.into());
    }
    let role = match actor_player.role {
        Some(role) if role.acts_at_night() => role,
        Some(role) => return Err(ValidationError::NoNightAction(role).into()),
        None => return Err(ValidationError::NoNightAction(Role::Villager).into()),
    };
    if state.night_actions.contains_key(&actor) {
        return Err(ValidationError::AlreadyActed.into());
    }

    if let NightChoice::Target(target) = choice {
        let target_player = state.player(target)?;
        if !target_player.alive {
            return Err(ValidationError::DeadTarget.into());
        }
        match role {
            Role::Vampire if target_player.is(Role::Vampire) => {
                return Err(ValidationError::VampireTarget.into());
            }
            Role::Doctor if state.last_protected == Some(target) => {
                return Err(GameError::RepeatedProtection { target });
            }
            _ => {}
        }
    }

    let mut next = state.clone();
    next.night_actions.insert(actor, choice);
    let idx = next.index_of(actor)?;
    next.players[idx].action_target = choice.target();

    let from = next.current_turn.unwrap_or(idx);
    next.current_turn = find_from(&next.players, from, |p| {
        p.alive && p.acts_at_night() && !next.night_actions.contains_key(&p.id)
    });

    debug!("Night {}: {} chose {choice:?}", next.day_count, actor);
    Ok(next)
}

/// Whether every eligible actor has acted or skipped.
#[must_use]
pub fn is_complete(state: &GameState) -> bool {
    state.pending_night_actors().next().is_none()
}

/// Targets chosen tonight by alive players holding `role`, in seating order
/// and without duplicates.
fn targets_of(state: &GameState, role: Role) -> Vec<(PlayerId, PlayerId)> {
    state
        .alive()
        .filter(|p| p.is(role))
        .filter_map(|p| {
            state
                .night_actions
                .get(&p.id)
                .and_then(|choice| choice.target())
                .map(|target| (p.id, target))
        })
        .collect()
}

/// Resolve the collected actions into the next snapshot.
///
/// Ends in the day phase, or in the ended phase if the deaths settle the game.
pub fn resolve(
    state: &GameState,
    settings: &GameSettings,
    rng: &mut dyn RandomSource,
) -> GameState {
    let mut next = state.clone();
    let night = state.day_count;

    for (seer, target) in targets_of(state, Role::Seer) {
        let is_vampire = state.player(target).is_ok_and(|p| p.is(Role::Vampire));
        next.visions.push(Vision {
            seer,
            target,
            night,
            is_vampire,
        });
    }

    let protected = targets_of(state, Role::Doctor)
        .first()
        .map(|&(_, target)| target);

    let mut attacked: Vec<PlayerId> = Vec::new();
    for (_, target) in targets_of(state, Role::Vampire) {
        if !attacked.contains(&target) {
            attacked.push(target);
        }
    }

    let mut dead = Vec::new();
    for target in attacked {
        if Some(target) == protected {
            next.log.push(GameEvent::PlayerSaved(target));
            continue;
        }
        if let Ok(player) = next.player_mut(target)
            && player.alive
        {
            player.alive = false;
            dead.push(target);
            next.log.push(GameEvent::PlayerKilled(target));
        }
    }

    hunter::retaliate(&mut next, &dead, settings.hunter_retaliation_chance, rng);

    next.night_actions.clear();
    for player in &mut next.players {
        player.action_target = None;
    }
    next.last_protected = protected;
    next.current_turn = None;

    if win::settle(&mut next).is_none() {
        next.phase = Phase::Day;
        next.log.push(GameEvent::DayBroke {
            day: next.day_count,
        });
    }

    next
}
