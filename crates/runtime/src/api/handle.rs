//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! feeding player input or streaming events.
use tokio::sync::{broadcast, mpsc, oneshot};

use grotto_core::{EntityId, InputOutcome, PlayerCommand};

use super::errors::{Result, RuntimeError};
use super::events::GameEvent;
use super::snapshot::MapSnapshot;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<GameEvent>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<GameEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    /// Submit input for the actor the engine is waiting on.
    ///
    /// Resolves once the input is applied and, if it consumed the turn, the
    /// world has advanced to the next point where input is needed.
    pub async fn submit(&self, command: PlayerCommand) -> Result<InputOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Input {
                command,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// The actor the engine is locked on, or `None` once the game is over.
    ///
    /// Fails with [`RuntimeError::Engine`] after the engine has failed.
    pub async fn awaiting_input(&self) -> Result<Option<EntityId>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::AwaitingInput { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Query the current map (read-only snapshot)
    pub async fn query_snapshot(&self) -> Result<MapSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QuerySnapshot { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to game events published after this call.
    pub fn subscribe_events(&self) -> broadcast::Receiver<GameEvent> {
        self.event_tx.subscribe()
    }
}
