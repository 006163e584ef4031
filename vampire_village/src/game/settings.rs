//! Rule settings for a game.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{
    assignment::role_multiset,
    constants::{
        DEFAULT_HUNTER_RETALIATION_CHANCE, DEFAULT_HUNTER_THRESHOLD, MAX_PLAYERS, MIN_PLAYERS,
    },
};

/// What happens when several players share the highest vote count.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakPolicy {
    /// Nobody is eliminated this round.
    #[default]
    NoElimination,
    /// One of the tied players is drawn uniformly at random.
    RandomAmongTied,
}

impl fmt::Display for TieBreakPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreakPolicy::NoElimination => write!(f, "no_elimination"),
            TieBreakPolicy::RandomAmongTied => write!(f, "random_among_tied"),
        }
    }
}

impl FromStr for TieBreakPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "no_elimination" | "none" => Ok(Self::NoElimination),
            "random_among_tied" | "random" => Ok(Self::RandomAmongTied),
            other => Err(format!("unknown tie-break policy {other:?}")),
        }
    }
}

/// Game configuration settings
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct GameSettings {
    pub min_players: usize,
    pub max_players: usize,
    /// Smallest roster that gets a Hunter.
    pub hunter_threshold: usize,
    pub hunter_retaliation_chance: f64,
    pub tie_break: TieBreakPolicy,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            min_players: MIN_PLAYERS,
            max_players: MAX_PLAYERS,
            hunter_threshold: DEFAULT_HUNTER_THRESHOLD,
            hunter_retaliation_chance: DEFAULT_HUNTER_RETALIATION_CHANCE,
            tie_break: TieBreakPolicy::NoElimination,
        }
    }
}

impl GameSettings {
    /// Validate settings: every roster size in range must be dealable.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_players > self.max_players {
            return Err(format!(
                "min players ({}) exceeds max players ({})",
                self.min_players, self.max_players
            ));
        }

        if !(0.0..=1.0).contains(&self.hunter_retaliation_chance) {
            return Err("Hunter retaliation chance must be between 0 and 1".to_string());
        }

        for count in self.min_players..=self.max_players {
            role_multiset(count, self).map_err(|e| format!("{count} players: {e}"))?;
        }

        Ok(())
    }

    /// Whether a roster of `count` players can start.
    #[must_use]
    pub fn roster_size_ok(&self, count: usize) -> bool {
        (self.min_players..=self.max_players).contains(&count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(GameSettings::default().validate().is_ok());
    }

    #[test]
    fn test_small_roster_rejected() {
        let settings = GameSettings {
            min_players: 5,
            ..GameSettings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.starts_with("5 players"), "{err}");
    }

    #[test]
    fn test_hunter_threshold_too_low_rejected() {
        // A Hunter at 7 players leaves only two Villagers.
        let settings = GameSettings {
            hunter_threshold: 7,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_chance_out_of_range_rejected() {
        let settings = GameSettings {
            hunter_retaliation_chance: 1.5,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_tie_break_parsing() {
        assert_eq!(
            "random".parse::<TieBreakPolicy>(),
            Ok(TieBreakPolicy::RandomAmongTied)
        );
        assert_eq!(
            "NO_ELIMINATION".parse::<TieBreakPolicy>(),
            Ok(TieBreakPolicy::NoElimination)
        );
        assert!("coin".parse::<TieBreakPolicy>().is_err());
    }
}
