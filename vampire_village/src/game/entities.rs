use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier for a player within a session.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for PlayerId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Role {
    Vampire,
    Villager,
    Doctor,
    Seer,
    Hunter,
}

impl Role {
    /// Every role, in catalog order.
    pub const ALL: [Role; 5] = [
        Role::Vampire,
        Role::Villager,
        Role::Doctor,
        Role::Seer,
        Role::Hunter,
    ];

    #[must_use]
    pub const fn faction(self) -> Faction {
        match self {
            Self::Vampire => Faction::Vampires,
            _ => Faction::Villagers,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Vampire => "vampire",
            Self::Villager => "villager",
            Self::Doctor => "doctor",
            Self::Seer => "seer",
            Self::Hunter => "hunter",
        };
        write!(f, "{repr}")
    }
}

/// The two sides that can win a game.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Faction {
    Villagers,
    Vampires,
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Villagers => "villagers",
            Self::Vampires => "vampires",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Unset until the game starts, immutable afterwards.
    pub role: Option<Role>,
    pub alive: bool,
    /// Role is public knowledge (set on vote elimination).
    pub revealed: bool,
    /// Player has privately looked at their role during the first night.
    pub has_seen_role: bool,
    /// Target of the night action this player submitted, if any.
    pub action_target: Option<PlayerId>,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            role: None,
            alive: true,
            revealed: false,
            has_seen_role: false,
            action_target: None,
        }
    }

    #[must_use]
    pub fn is(&self, role: Role) -> bool {
        self.role == Some(role)
    }

    #[must_use]
    pub fn acts_at_night(&self) -> bool {
        self.role.is_some_and(Role::acts_at_night)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}

/// What an eligible actor submitted for the night.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum NightChoice {
    Target(PlayerId),
    Skip,
}

impl NightChoice {
    #[must_use]
    pub const fn target(self) -> Option<PlayerId> {
        match self {
            Self::Target(id) => Some(id),
            Self::Skip => None,
        }
    }
}

/// A Seer's private look at another player's allegiance.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Vision {
    pub seer: PlayerId,
    pub target: PlayerId,
    pub night: u32,
    pub is_vampire: bool,
}

/// Public record of what happened during a session.
///
/// Seer results never appear here; they live in [`Vision`]s that only the
/// owning Seer can see.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum GameEvent {
    PlayerJoined(PlayerId),
    PlayerLeft(PlayerId),
    RolesAssigned,
    RoleSeen(PlayerId),
    NightFell { night: u32 },
    PlayerSaved(PlayerId),
    PlayerKilled(PlayerId),
    /// A dying Hunter's draw and whoever it took down.
    HunterDraw {
        hunter: PlayerId,
        roll: f64,
        victim: Option<PlayerId>,
    },
    DayBroke { day: u32 },
    VotingOpened,
    VoteTied(Vec<PlayerId>),
    PlayerEliminated { player: PlayerId, role: Role },
    GameWon(Faction),
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::PlayerJoined(id) => format!("{id} joined the village"),
            Self::PlayerLeft(id) => format!("{id} left the village"),
            Self::RolesAssigned => "roles were dealt".to_string(),
            Self::RoleSeen(id) => format!("{id} looked at their role"),
            Self::NightFell { night } => format!("night {night} fell"),
            Self::PlayerSaved(id) => format!("{id} was attacked but saved"),
            Self::PlayerKilled(id) => format!("{id} was killed"),
            Self::HunterDraw {
                hunter,
                roll,
                victim: Some(victim),
            } => format!("hunter {hunter} rolled {roll:.3} and took {victim} down"),
            Self::HunterDraw {
                hunter,
                roll,
                victim: None,
            } => format!("hunter {hunter} rolled {roll:.3} and missed"),
            Self::DayBroke { day } => format!("day {day} broke"),
            Self::VotingOpened => "voting opened".to_string(),
            Self::VoteTied(ids) => format!("vote tied between {} players", ids.len()),
            Self::PlayerEliminated { player, role } => {
                format!("{player} was voted out and was a {role}")
            }
            Self::GameWon(faction) => format!("the {faction} won"),
        };
        write!(f, "{repr}")
    }
}
