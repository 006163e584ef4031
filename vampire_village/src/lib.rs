//! # Vampire Village
//!
//! A vampire/villager social-deduction game engine for 7-15 players sharing
//! one device or one session authority.
//!
//! The engine is a finite state machine over immutable [`GameState`]
//! snapshots. Every intent (adding a player, a night action, a vote, ...)
//! produces either a brand new snapshot or a typed [`GameError`], leaving
//! the previous snapshot untouched.
//!
//! ## Architecture
//!
//! The game moves through six phases:
//!
//! - **Setup**: building the roster
//! - **FirstNight**: every player privately looks at their role, in turn
//! - **Night**: Vampires, the Doctor and the Seer submit private actions
//! - **Day**: the village discusses what happened
//! - **Voting**: every living player votes someone out
//! - **Ended**: one faction has won
//!
//! ## Core Modules
//!
//! - [`game`]: role catalog, roster, role assignment, night resolution,
//!   vote tally, win evaluation and the phase engine
//! - [`session`]: an async actor that serializes intents from many callers
//!   onto one engine and publishes snapshots to subscribers
//!
//! ## Example
//!
//! ```
//! use vampire_village::{GameEngine, Intent, Phase};
//!
//! let mut engine = GameEngine::new();
//! for name in ["Ada", "Bo", "Cy", "Di", "Ed", "Flo", "Gus"] {
//!     engine.apply(Intent::AddPlayer { name: name.to_string() }).unwrap();
//! }
//! let state = engine.apply(Intent::StartGame).unwrap();
//! assert_eq!(state.phase, Phase::FirstNight);
//! ```

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    GameEngine, GameError, GameSettings, GameState, Intent, IntentKind, Phase, SetupError,
    TieBreakPolicy, ValidationError,
    catalog::{self, ROLE_CATALOG, RoleDefinition},
    constants::{self, MAX_PLAYERS, MIN_PLAYERS},
    entities::{self, Faction, GameEvent, NightChoice, Player, PlayerId, Role, Vision},
    sources::{IdSource, RandomSource, RngSource, ScriptedSource, SequentialIds, UuidSource},
    view::{GameView, PlayerView},
};

/// Single-writer session actor.
pub mod session;
pub use session::{SessionActor, SessionConfig, SessionError, SessionHandle};
