//! Session actor implementation with async message handling.

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use super::{
    config::SessionConfig,
    errors::{SessionError, SessionResult},
    messages::SessionMessage,
};
use crate::game::{
    GameEngine, GameState, Intent,
    entities::PlayerId,
    sources::{RandomSource, RngSource, UuidSource},
    view::GameView,
};

/// Session actor handle for sending messages
#[derive(Clone, Debug)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionMessage>,
    session_id: Uuid,
}

impl SessionHandle {
    /// Create a new session handle
    pub fn new(sender: mpsc::Sender<SessionMessage>, session_id: Uuid) -> Self {
        Self { sender, session_id }
    }

    /// Get session ID
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Whether the actor has stopped
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Send a message to the session
    pub async fn send(&self, message: SessionMessage) -> SessionResult<()> {
        self.sender
            .send(message)
            .await
            .map_err(|_| SessionError::Closed)
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> SessionMessage,
    ) -> SessionResult<T> {
        let (response, receiver) = oneshot::channel();
        self.send(build(response)).await?;
        receiver.await.map_err(|_| SessionError::Closed)
    }

    /// Apply an intent and wait for the resulting snapshot
    pub async fn apply(&self, intent: Intent) -> SessionResult<Arc<GameState>> {
        let result = self
            .request(|response| SessionMessage::Apply { intent, response })
            .await?;
        Ok(result?)
    }

    /// Get the current snapshot
    pub async fn state(&self) -> SessionResult<Arc<GameState>> {
        self.request(|response| SessionMessage::GetState { response })
            .await
    }

    /// Get what `player` is allowed to see
    pub async fn view(&self, player: PlayerId) -> SessionResult<GameView> {
        let result = self
            .request(|response| SessionMessage::GetView { player, response })
            .await?;
        Ok(result?)
    }

    /// Receive every snapshot published after this call
    pub async fn subscribe(&self) -> SessionResult<mpsc::Receiver<Arc<GameState>>> {
        self.request(|response| SessionMessage::Subscribe { response })
            .await
    }

    /// Stop the actor and wait for it to acknowledge
    pub async fn close(&self) -> SessionResult<()> {
        self.request(|response| SessionMessage::Close { response })
            .await
    }
}

/// Session actor owning a single game
pub struct SessionActor {
    /// Session ID
    id: Uuid,

    /// Session configuration
    config: SessionConfig,

    /// The game and its subscribers
    engine: GameEngine,

    /// Message inbox
    inbox: mpsc::Receiver<SessionMessage>,

    /// Is session closed
    is_closed: bool,
}

impl SessionActor {
    /// Create a new session actor
    ///
    /// Randomness is seeded from `config.seed` when set, so two sessions
    /// built from the same config deal identical games.
    ///
    /// # Returns
    ///
    /// * `(SessionActor, SessionHandle)` - Actor and handle for sending messages
    #[must_use]
    pub fn new(config: SessionConfig) -> (Self, SessionHandle) {
        let rng: Box<dyn RandomSource> = match config.seed {
            Some(seed) => Box::new(RngSource::seeded(seed)),
            None => Box::new(RngSource::from_entropy()),
        };
        let engine = GameEngine::with_sources(config.settings.clone(), rng, Box::new(UuidSource))
            .with_subscriber_capacity(config.subscriber_capacity);
        Self::with_engine(config, engine)
    }

    /// Create a session actor around an existing engine
    #[must_use]
    pub fn with_engine(config: SessionConfig, engine: GameEngine) -> (Self, SessionHandle) {
        let (sender, inbox) = mpsc::channel(config.inbox_capacity.max(1));
        let id = Uuid::new_v4();

        let actor = Self {
            id,
            config,
            engine,
            inbox,
            is_closed: false,
        };

        (actor, SessionHandle::new(sender, id))
    }

    /// Run the session actor event loop
    ///
    /// Returns once a `Close` message is handled or every handle is dropped.
    pub async fn run(mut self) {
        log::info!("Session {} '{}' starting", self.id, self.config.name);

        while let Some(message) = self.inbox.recv().await {
            self.handle_message(message);

            if self.is_closed {
                break;
            }
        }

        log::info!("Session {} '{}' closed", self.id, self.config.name);
    }

    /// Handle a session message
    fn handle_message(&mut self, message: SessionMessage) {
        match message {
            SessionMessage::Apply { intent, response } => {
                let result = self.engine.apply(intent);
                let _ = response.send(result);
            }

            SessionMessage::GetState { response } => {
                let _ = response.send(self.engine.state());
            }

            SessionMessage::GetView { player, response } => {
                let _ = response.send(self.engine.view_for(player));
            }

            SessionMessage::Subscribe { response } => {
                let _ = response.send(self.engine.subscribe());
            }

            SessionMessage::Close { response } => {
                self.is_closed = true;
                let _ = response.send(());
            }
        }
    }
}
