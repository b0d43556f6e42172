//! Simulation worker that owns the authoritative [`grotto_core::Engine`].
//!
//! Receives commands from [`RuntimeHandle`](crate::api::RuntimeHandle),
//! applies player input, drives every other actor until input is needed
//! again, and publishes [`GameEvent`]s along the way.

use std::sync::{Arc, Mutex};

use grotto_core::{Engine, EngineError, EngineStatus, EntityId, InputOutcome, PlayerCommand};
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, error, info, warn};

use crate::api::{GameEvent, MapSnapshot, Result, RuntimeError};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Apply input for the actor the engine is locked on.
    Input {
        command: PlayerCommand,
        reply: oneshot::Sender<Result<InputOutcome>>,
    },
    /// Which actor, if any, is waiting on input.
    AwaitingInput {
        reply: oneshot::Sender<Result<Option<EntityId>>>,
    },
    /// Query the current map (read-only).
    QuerySnapshot { reply: oneshot::Sender<MapSnapshot> },
}

/// Background task that processes gameplay commands.
pub struct SimulationWorker {
    engine: Engine,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<GameEvent>,
    /// What the renderer last drew. Shared with the engine's renderer.
    latest: Arc<Mutex<MapSnapshot>>,
    game_over: bool,
    /// First engine failure. Once set, every input and turn query reports it.
    failure: Option<EngineError>,
}

impl SimulationWorker {
    pub fn new(
        engine: Engine,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<GameEvent>,
        latest: Arc<Mutex<MapSnapshot>>,
    ) -> Self {
        info!(
            entities = engine.map().entity_count(),
            width = engine.map().width(),
            height = engine.map().height(),
            "SimulationWorker initialized"
        );

        Self {
            engine,
            command_rx,
            event_tx,
            latest,
            game_over: false,
            failure: None,
        }
    }

    /// Main worker loop. Runs the world up to the first player turn, then
    /// serves commands until every handle is dropped.
    pub async fn run(mut self) {
        // A failure here is recorded and replayed to the first command.
        let _ = self.advance().await;

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        debug!("command channel closed, simulation worker stopping");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Input { command, reply } => {
                let result = self.apply_input(command).await;
                if reply.send(result).is_err() {
                    debug!("Input reply channel closed (caller dropped)");
                }
            }
            Command::AwaitingInput { reply } => {
                let waiting = match &self.failure {
                    Some(error) => Err(RuntimeError::Engine(error.clone())),
                    None => Ok(self.engine.scheduler().waiting_on()),
                };
                if reply.send(waiting).is_err() {
                    debug!("AwaitingInput reply channel closed (caller dropped)");
                }
            }
            Command::QuerySnapshot { reply } => {
                if reply.send(self.snapshot()).is_err() {
                    debug!("QuerySnapshot reply channel closed (caller dropped)");
                }
            }
        }
    }

    async fn apply_input(&mut self, command: PlayerCommand) -> Result<InputOutcome> {
        if let Some(error) = &self.failure {
            return Err(RuntimeError::Engine(error.clone()));
        }
        if self.game_over {
            return Err(RuntimeError::GameOver);
        }

        let outcome = self.engine.handle_input(command)?;
        debug!(?command, ?outcome, "input applied");

        match outcome {
            InputOutcome::Consumed => self.advance().await?,
            InputOutcome::Blocked => {}
            InputOutcome::GameOver => self.finish(),
        }
        Ok(outcome)
    }

    /// Runs the engine until it locks on a player or the game ends.
    async fn advance(&mut self) -> Result<()> {
        if self.game_over {
            return Ok(());
        }

        loop {
            let status = self.engine.run();
            if self.settle(status)? {
                return Ok(());
            }
            tokio::task::yield_now().await;
        }
    }

    /// Reacts to one engine run. Returns `true` once the world is waiting on
    /// input or over, `false` when the engine should keep going.
    fn settle(&mut self, status: std::result::Result<EngineStatus, EngineError>) -> Result<bool> {
        match status {
            Ok(EngineStatus::AwaitingInput(actor)) => {
                let messages = self.latest_snapshot().messages_for(actor);
                self.publish(GameEvent::AwaitingInput { actor, messages });
                Ok(true)
            }
            Ok(EngineStatus::GameOver) => {
                self.finish();
                Ok(true)
            }
            Ok(EngineStatus::StepLimit) => {
                warn!(
                    limit = self.engine.config().max_steps_without_input,
                    "step limit reached without player input; yielding"
                );
                Ok(false)
            }
            Err(error) => {
                error!(%error, "engine failed while advancing turns");
                self.failure = Some(error.clone());
                Err(RuntimeError::Engine(error))
            }
        }
    }

    fn finish(&mut self) {
        if !self.game_over {
            info!("no player-controlled entity remains; game over");
            self.game_over = true;
            self.publish(GameEvent::GameOver);
        }
    }

    /// While locked, the last refresh is exactly what the waiting player saw
    /// (including messages the actor has since cleared). Otherwise capture
    /// the live map.
    fn snapshot(&self) -> MapSnapshot {
        if self.engine.scheduler().is_locked() {
            self.latest_snapshot()
        } else {
            MapSnapshot::capture(self.engine.map())
        }
    }

    fn latest_snapshot(&self) -> MapSnapshot {
        match self.latest.lock() {
            Ok(latest) => latest.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn publish(&self, event: GameEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("no event subscribers");
        }
    }
}
