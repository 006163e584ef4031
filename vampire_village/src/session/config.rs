//! Session configuration.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use serde::{Deserialize, Serialize};

use crate::game::{
    GameSettings, TieBreakPolicy,
    constants::{
        DEFAULT_HUNTER_RETALIATION_CHANCE, DEFAULT_HUNTER_THRESHOLD,
        DEFAULT_SUBSCRIBER_CAPACITY, MAX_PLAYERS, MIN_PLAYERS,
    },
};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Session name, used in logs
    pub name: String,

    /// Capacity of the actor inbox (default: 100)
    pub inbox_capacity: usize,

    /// Capacity of each snapshot subscriber channel (default: 32)
    pub subscriber_capacity: usize,

    /// Seed for a reproducible session; random when unset
    pub seed: Option<u64>,

    /// Game rules
    pub settings: GameSettings,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            name: "Village".to_string(),
            inbox_capacity: 100,
            subscriber_capacity: DEFAULT_SUBSCRIBER_CAPACITY,
            seed: None,
            settings: GameSettings::default(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but can't be parsed, or if the
    /// resulting configuration is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let settings = GameSettings {
            min_players: parse_env("VV_MIN_PLAYERS")?.unwrap_or(MIN_PLAYERS),
            max_players: parse_env("VV_MAX_PLAYERS")?.unwrap_or(MAX_PLAYERS),
            hunter_threshold: parse_env("VV_HUNTER_THRESHOLD")?
                .unwrap_or(DEFAULT_HUNTER_THRESHOLD),
            hunter_retaliation_chance: parse_env("VV_HUNTER_CHANCE")?
                .unwrap_or(DEFAULT_HUNTER_RETALIATION_CHANCE),
            tie_break: parse_env::<TieBreakPolicy>("VV_TIE_BREAK")?.unwrap_or_default(),
        };

        let config = Self {
            name: std::env::var("VV_SESSION_NAME").unwrap_or(defaults.name),
            inbox_capacity: parse_env("VV_INBOX_CAPACITY")?.unwrap_or(defaults.inbox_capacity),
            subscriber_capacity: parse_env("VV_SUBSCRIBER_CAPACITY")?
                .unwrap_or(defaults.subscriber_capacity),
            seed: parse_env("VV_SEED")?,
            settings,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.inbox_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "VV_INBOX_CAPACITY".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.subscriber_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "VV_SUBSCRIBER_CAPACITY".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        self.settings
            .validate()
            .map_err(|reason| ConfigError::Invalid {
                var: "settings".to_string(),
                reason,
            })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Parse an optional environment variable, rejecting values that don't parse
fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid {
                var: key.to_string(),
                reason: format!("Can't parse {raw:?}"),
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 9] = [
        "VV_SESSION_NAME",
        "VV_INBOX_CAPACITY",
        "VV_SUBSCRIBER_CAPACITY",
        "VV_SEED",
        "VV_MIN_PLAYERS",
        "VV_MAX_PLAYERS",
        "VV_HUNTER_THRESHOLD",
        "VV_HUNTER_CHANCE",
        "VV_TIE_BREAK",
    ];

    fn clear_env() {
        for var in VARS {
            // SAFETY: tests touching the environment are serialized.
            unsafe { std::env::remove_var(var) };
        }
    }

    fn set_env(key: &str, value: &str) {
        // SAFETY: tests touching the environment are serialized.
        unsafe { std::env::set_var(key, value) };
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Invalid {
            var: "VV_SEED".to_string(),
            reason: "Can't parse".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("VV_SEED"));
        assert!(msg.contains("Can't parse"));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_inbox_rejected() {
        let config = SessionConfig {
            inbox_capacity: 0,
            ..SessionConfig::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::Invalid { ref var, .. } if var == "VV_INBOX_CAPACITY"
        ));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = SessionConfig::from_env().unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        set_env("VV_SESSION_NAME", "Transylvania");
        set_env("VV_SEED", "99");
        set_env("VV_TIE_BREAK", "random");
        set_env("VV_HUNTER_CHANCE", "0.25");

        let config = SessionConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.name, "Transylvania");
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.settings.tie_break, TieBreakPolicy::RandomAmongTied);
        assert_eq!(config.settings.hunter_retaliation_chance, 0.25);
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_garbage() {
        clear_env();
        set_env("VV_INBOX_CAPACITY", "lots");
        let err = SessionConfig::from_env().unwrap_err();
        clear_env();
        assert!(err.to_string().contains("VV_INBOX_CAPACITY"));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_undealable_rules() {
        clear_env();
        set_env("VV_MIN_PLAYERS", "4");
        let err = SessionConfig::from_env().unwrap_err();
        clear_env();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "settings"));
    }
}
