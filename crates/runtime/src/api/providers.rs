//! Asynchronous abstraction for sourcing player intent.
//!
//! Runtime users plug in [`InputProvider`] implementations so the simulation
//! can run with human input, scripted fixtures, or automated play.
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use grotto_core::{Direction, EntityId, PlayerCommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::errors::{Result, RuntimeError};
use super::snapshot::MapSnapshot;

/// Trait for providing player commands based on the current map.
#[async_trait]
pub trait InputProvider: Send + Sync {
    /// Provide a command for `actor`, who is waiting on input.
    async fn provide_input(&self, actor: EntityId, snapshot: &MapSnapshot)
    -> Result<PlayerCommand>;
}

/// A simple provider that always waits.
/// Useful for testing or as a fallback.
pub struct WaitInputProvider;

#[async_trait]
impl InputProvider for WaitInputProvider {
    async fn provide_input(
        &self,
        _actor: EntityId,
        _snapshot: &MapSnapshot,
    ) -> Result<PlayerCommand> {
        Ok(PlayerCommand::Wait)
    }
}

/// Replays a fixed list of commands, then fails.
pub struct ScriptedInputProvider {
    commands: Mutex<VecDeque<PlayerCommand>>,
}

impl ScriptedInputProvider {
    pub fn new(commands: impl IntoIterator<Item = PlayerCommand>) -> Self {
        Self {
            commands: Mutex::new(commands.into_iter().collect()),
        }
    }
}

#[async_trait]
impl InputProvider for ScriptedInputProvider {
    async fn provide_input(
        &self,
        _actor: EntityId,
        _snapshot: &MapSnapshot,
    ) -> Result<PlayerCommand> {
        let mut commands = self
            .commands
            .lock()
            .map_err(|_| RuntimeError::Provider("command script lock poisoned".to_owned()))?;
        commands
            .pop_front()
            .ok_or_else(|| RuntimeError::Provider("command script exhausted".to_owned()))
    }
}

/// Stumbles around: a random direction each turn.
pub struct RandomWalkProvider {
    rng: Mutex<StdRng>,
}

impl RandomWalkProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

#[async_trait]
impl InputProvider for RandomWalkProvider {
    async fn provide_input(
        &self,
        _actor: EntityId,
        _snapshot: &MapSnapshot,
    ) -> Result<PlayerCommand> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| RuntimeError::Provider("random walk lock poisoned".to_owned()))?;
        let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        Ok(PlayerCommand::Move(direction))
    }
}
