//! Session actor message types.

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use crate::game::{GameResult, GameState, Intent, entities::PlayerId, view::GameView};

/// Messages that can be sent to a SessionActor
#[derive(Debug)]
pub enum SessionMessage {
    /// Apply one intent to the game
    Apply {
        intent: Intent,
        response: oneshot::Sender<GameResult<Arc<GameState>>>,
    },

    /// Get the current snapshot
    GetState {
        response: oneshot::Sender<Arc<GameState>>,
    },

    /// Get what a specific player may see
    GetView {
        player: PlayerId,
        response: oneshot::Sender<GameResult<GameView>>,
    },

    /// Subscribe to every future snapshot
    Subscribe {
        response: oneshot::Sender<mpsc::Receiver<Arc<GameState>>>,
    },

    /// Stop the actor
    Close { response: oneshot::Sender<()> },
}
