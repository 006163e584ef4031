//! Vampire Village game engine - core FSM and game logic.
//!
//! This module provides:
//! - The static role catalog and canonical role distribution
//! - Roster management during setup
//! - Night action validation and causally-ordered resolution
//! - Vote tallying with Hunter retaliation
//! - Win evaluation and the phase state machine

pub mod assignment;
pub mod catalog;
pub mod constants;
pub mod engine;
pub mod entities;
pub mod errors;
pub mod hunter;
pub mod night;
pub mod roster;
pub mod settings;
pub mod sources;
pub mod state;
pub mod view;
pub mod voting;
pub mod win;

pub use engine::{GameEngine, Intent, IntentKind, transition};
pub use errors::{GameError, GameResult, SetupError, ValidationError};
pub use settings::{GameSettings, TieBreakPolicy};
pub use state::{GameState, Phase};
