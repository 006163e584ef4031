//! Static role registry.

use serde::Serialize;

use super::entities::Role;

/// Rules attached to one role kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct RoleDefinition {
    pub role: Role,
    pub acts_at_night: bool,
    pub min_count: usize,
    pub max_count: usize,
}

impl RoleDefinition {
    #[must_use]
    pub const fn allows(&self, count: usize) -> bool {
        self.min_count <= count && count <= self.max_count
    }
}

pub static ROLE_CATALOG: [RoleDefinition; 5] = [
    RoleDefinition {
        role: Role::Vampire,
        acts_at_night: true,
        min_count: 2,
        max_count: 3,
    },
    RoleDefinition {
        role: Role::Villager,
        acts_at_night: false,
        min_count: 3,
        max_count: 10,
    },
    RoleDefinition {
        role: Role::Doctor,
        acts_at_night: true,
        min_count: 1,
        max_count: 1,
    },
    RoleDefinition {
        role: Role::Seer,
        acts_at_night: true,
        min_count: 1,
        max_count: 1,
    },
    RoleDefinition {
        role: Role::Hunter,
        acts_at_night: false,
        min_count: 0,
        max_count: 1,
    },
];

/// Look up the definition for a role.
#[must_use]
pub fn definition(role: Role) -> &'static RoleDefinition {
    match role {
        Role::Vampire => &ROLE_CATALOG[0],
        Role::Villager => &ROLE_CATALOG[1],
        Role::Doctor => &ROLE_CATALOG[2],
        Role::Seer => &ROLE_CATALOG[3],
        Role::Hunter => &ROLE_CATALOG[4],
    }
}

impl Role {
    #[must_use]
    pub fn acts_at_night(self) -> bool {
        definition(self).acts_at_night
    }
}

/// Returns the first role whose count in `roles` falls outside its bounds.
#[must_use]
pub fn first_violation(roles: &[Role]) -> Option<(&'static RoleDefinition, usize)> {
    ROLE_CATALOG.iter().find_map(|def| {
        let count = roles.iter().filter(|&&role| role == def.role).count();
        (!def.allows(count)).then_some((def, count))
    })
}
