//! Role distribution.

use super::{
    catalog::first_violation,
    constants::VAMPIRE_COUNT,
    entities::{Player, Role},
    errors::SetupError,
    settings::GameSettings,
    sources::{RandomSource, shuffle},
};

/// The exact multiset of roles dealt to a roster of `count` players, in
/// catalog order (unshuffled).
pub fn role_multiset(count: usize, settings: &GameSettings) -> Result<Vec<Role>, SetupError> {
    if !settings.roster_size_ok(count) {
        return Err(SetupError::RosterSize {
            count,
            min: settings.min_players,
            max: settings.max_players,
        });
    }

    let hunters = usize::from(count >= settings.hunter_threshold);
    let specials = VAMPIRE_COUNT + 2 + hunters;
    let villagers = count.checked_sub(specials).ok_or(SetupError::RosterSize {
        count,
        min: specials,
        max: settings.max_players,
    })?;

    let mut roles = Vec::with_capacity(count);
    roles.extend(std::iter::repeat_n(Role::Vampire, VAMPIRE_COUNT));
    roles.extend(std::iter::repeat_n(Role::Villager, villagers));
    roles.push(Role::Doctor);
    roles.push(Role::Seer);
    roles.extend(std::iter::repeat_n(Role::Hunter, hunters));

    if let Some((def, count)) = first_violation(&roles) {
        return Err(SetupError::RoleBounds {
            role: def.role,
            count,
            min: def.min_count,
            max: def.max_count,
        });
    }

    Ok(roles)
}

/// Deal roles to `players`.
///
/// Both the role multiset and the seating order are shuffled independently
/// and then zipped, so no seat is favored. The returned roster keeps the
/// original seating order. On error no player receives a role.
pub fn assign(
    players: &[Player],
    settings: &GameSettings,
    rng: &mut dyn RandomSource,
) -> Result<Vec<Player>, SetupError> {
    let mut roles = role_multiset(players.len(), settings)?;
    shuffle(&mut roles, rng);

    let mut seats: Vec<usize> = (0..players.len()).collect();
    shuffle(&mut seats, rng);

    let mut dealt = players.to_vec();
    for (seat, role) in seats.into_iter().zip(roles) {
        dealt[seat].role = Some(role);
    }

    Ok(dealt)
}
