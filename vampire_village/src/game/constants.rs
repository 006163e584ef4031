/// Smallest roster that can start a game.
pub const MIN_PLAYERS: usize = 7;
/// Largest roster that can start a game.
pub const MAX_PLAYERS: usize = 15;

/// Vampires dealt in every game.
pub const VAMPIRE_COUNT: usize = 2;

/// Below this roster size the Hunter is left out so that at least three
/// plain Villagers remain.
pub const DEFAULT_HUNTER_THRESHOLD: usize = 8;

/// Probability that a dying Hunter takes someone with them.
pub const DEFAULT_HUNTER_RETALIATION_CHANCE: f64 = 0.5;

/// Longest accepted player name, in characters, after trimming.
pub const MAX_NAME_LENGTH: usize = 32;

/// Bounded capacity for subscriber channels.
pub const DEFAULT_SUBSCRIBER_CAPACITY: usize = 32;
