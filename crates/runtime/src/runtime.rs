//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the game.

use std::sync::{Arc, Mutex};

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use grotto_core::{Engine, GameConfig, InputOutcome, Map, RandomSource};

use crate::api::{
    EventRenderer, GameEvent, InputProvider, MapSnapshot, Result, RuntimeError, RuntimeHandle,
};
use crate::random::SeededRandom;
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Seed for the engine's random source when none is supplied.
    /// `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            seed: None,
        }
    }
}

/// Main runtime that orchestrates game simulation
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    player_provider: Option<Box<dyn InputProvider>>,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to game events
    pub fn subscribe_events(&self) -> broadcast::Receiver<GameEvent> {
        self.handle.subscribe_events()
    }

    /// Ask the player provider for one command and submit it.
    ///
    /// Fails with [`RuntimeError::GameOver`] once nobody is waiting on input.
    pub async fn step(&mut self) -> Result<InputOutcome> {
        let provider = self
            .player_provider
            .as_ref()
            .ok_or(RuntimeError::ProviderNotSet)?;

        let actor = self
            .handle
            .awaiting_input()
            .await?
            .ok_or(RuntimeError::GameOver)?;
        let snapshot = self.handle.query_snapshot().await?;

        let command = provider.provide_input(actor, &snapshot).await?;
        self.handle.submit(command).await
    }

    /// Submit up to `max_inputs` commands, stopping early when the game ends.
    /// Returns the number of commands submitted.
    pub async fn run(&mut self, max_inputs: usize) -> Result<usize> {
        let mut submitted = 0;
        while submitted < max_inputs {
            match self.step().await {
                Ok(InputOutcome::GameOver) => {
                    submitted += 1;
                    break;
                }
                Ok(_) => submitted += 1,
                Err(RuntimeError::GameOver) => break,
                Err(error) => return Err(error),
            }
        }
        debug!(submitted, "run finished");
        Ok(submitted)
    }

    /// Set the player input provider
    pub fn set_player_provider(&mut self, provider: impl InputProvider + 'static) {
        self.player_provider = Some(Box::new(provider));
    }

    /// Shutdown the runtime gracefully.
    ///
    /// The worker stops once every [`RuntimeHandle`] clone is dropped; this
    /// waits for that.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    map: Option<Map>,
    random: Option<Box<dyn RandomSource + Send>>,
    player_provider: Option<Box<dyn InputProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            map: None,
            random: None,
            player_provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the populated starting map (required)
    pub fn map(mut self, map: Map) -> Self {
        self.map = Some(map);
        self
    }

    /// Use a specific random source instead of one derived from the config seed
    pub fn random_source(mut self, random: impl RandomSource + Send + 'static) -> Self {
        self.random = Some(Box::new(random));
        self
    }

    /// Set player input provider (optional)
    pub fn player_provider(mut self, provider: impl InputProvider + 'static) -> Self {
        self.player_provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime and spawn the simulation worker.
    ///
    /// The worker immediately runs the world up to the first player turn.
    pub async fn build(self) -> Result<Runtime> {
        let map = self.map.ok_or(RuntimeError::MissingMap)?;

        let random: Box<dyn RandomSource + Send> = match self.random {
            Some(random) => random,
            None => match self.config.seed {
                Some(seed) => Box::new(SeededRandom::new(seed)),
                None => Box::new(SeededRandom::from_entropy()),
            },
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (event_tx, _event_rx) = broadcast::channel::<GameEvent>(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_tx.clone());

        let latest = Arc::new(Mutex::new(MapSnapshot::capture(&map)));
        let engine = Engine::new(map, random)
            .with_config(self.config.game_config.clone())
            .with_renderer(EventRenderer::new(event_tx.clone(), Arc::clone(&latest)));

        info!(seed = ?self.config.seed, "starting simulation worker");
        let sim_worker = SimulationWorker::new(engine, command_rx, event_tx, latest);
        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            player_provider: self.player_provider,
            sim_worker_handle,
        })
    }
}
