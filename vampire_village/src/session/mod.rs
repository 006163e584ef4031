//! Session module providing a single serializing authority over one game.
//!
//! This module implements:
//! - SessionActor: async actor owning the only [`GameEngine`](crate::GameEngine)
//! - SessionHandle: cloneable handle that many callers can share
//! - Message-based communication with tokio channels
//! - Session configuration loaded from defaults or the environment
//!
//! ## Architecture
//!
//! The session runs in its own Tokio task with an mpsc message inbox.
//! Intents from every handle are queued in the inbox and applied one at a
//! time, so two intents are never applied against the same snapshot.
//!
//! ## Example
//!
//! ```
//! use vampire_village::{Intent, SessionActor, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, handle) = SessionActor::new(SessionConfig::default());
//!     tokio::spawn(actor.run());
//!
//!     let state = handle
//!         .apply(Intent::AddPlayer { name: "Ada".to_string() })
//!         .await
//!         .unwrap();
//!     assert_eq!(state.players.len(), 1);
//! }
//! ```

pub mod actor;
pub mod config;
pub mod errors;
pub mod messages;

pub use actor::{SessionActor, SessionHandle};
pub use config::{ConfigError, SessionConfig};
pub use errors::SessionError;
pub use messages::SessionMessage;
