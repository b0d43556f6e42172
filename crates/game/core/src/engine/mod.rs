//! Turn scheduling and player input.
//!
//! The [`Engine`] owns the [`Map`] and drives every actor-capable entity in a
//! stable round-robin. A player-controlled actor locks the engine at the
//! start of its turn; [`Engine::run`] then returns
//! [`EngineStatus::AwaitingInput`] and nothing else is scheduled until
//! [`Engine::handle_input`] consumes the turn.

mod context;
mod errors;
mod turns;

pub use context::{NullRenderer, Renderer, TurnContext};
pub use errors::EngineError;
pub use turns::SchedulerLock;

use crate::capability::{CapabilityKind, act, try_move};
use crate::config::GameConfig;
use crate::env::RandomSource;
use crate::state::{Direction, EntityId, Map};

/// Discrete action supplied by the input handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerCommand {
    Move(Direction),
    Wait,
}

/// Why [`Engine::run`] stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineStatus {
    /// Locked until `actor`'s input arrives.
    AwaitingInput(EntityId),
    /// No player-controlled entity remains.
    GameOver,
    /// `max_steps_without_input` slots ran without any player turn.
    StepLimit,
}

/// Result of one [`Engine::handle_input`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputOutcome {
    /// The turn was used up and the engine is unlocked.
    Consumed,
    /// The action was blocked; the engine stays locked on the same actor.
    Blocked,
    /// The waiting actor is gone. The engine unlocked itself.
    GameOver,
}

/// Owns the world and runs turns over it.
pub struct Engine {
    map: Map,
    rng: Box<dyn RandomSource + Send>,
    renderer: Box<dyn Renderer + Send>,
    config: GameConfig,
    scheduler: SchedulerLock,
    cursor: Option<EntityId>,
}

impl Engine {
    pub fn new(map: Map, rng: impl RandomSource + Send + 'static) -> Self {
        Self {
            map,
            rng: Box::new(rng),
            renderer: Box::new(NullRenderer),
            config: GameConfig::default(),
            scheduler: SchedulerLock::Unlocked,
            cursor: None,
        }
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_renderer(mut self, renderer: impl Renderer + Send + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scheduler(&self) -> SchedulerLock {
        self.scheduler
    }

    /// True once no entity with a [`PlayerActor`](crate::capability::PlayerActor) remains.
    pub fn is_game_over(&self) -> bool {
        !self
            .map
            .entities()
            .any(|(_, entity)| entity.has_capability(CapabilityKind::PlayerActor))
    }

    fn context(&mut self) -> TurnContext<'_> {
        TurnContext {
            map: &mut self.map,
            rng: &mut *self.rng,
            renderer: &mut *self.renderer,
            config: &self.config,
            scheduler: &mut self.scheduler,
        }
    }

    /// Runs a single scheduling slot and returns the actor that acted, or
    /// `None` when no actor is left on the map.
    pub fn step(&mut self) -> Result<Option<EntityId>, EngineError> {
        if let Some(actor) = self.scheduler.waiting_on() {
            return Err(EngineError::Locked { actor });
        }

        let Some(actor) = turns::next_actor(&self.map, self.cursor) else {
            return Ok(None);
        };
        self.cursor = Some(actor);
        act(&mut self.context(), actor)?;
        Ok(Some(actor))
    }

    /// Schedules slots until the engine locks, the game ends, or the step
    /// limit is reached.
    pub fn run(&mut self) -> Result<EngineStatus, EngineError> {
        let mut steps = 0;
        loop {
            if let Some(actor) = self.scheduler.waiting_on() {
                if self.map.entity(actor).is_some() {
                    return Ok(EngineStatus::AwaitingInput(actor));
                }
                self.scheduler.unlock();
            }
            if self.is_game_over() {
                return Ok(EngineStatus::GameOver);
            }
            if steps >= self.config.max_steps_without_input {
                return Ok(EngineStatus::StepLimit);
            }

            self.step()?;
            steps += 1;
        }
    }

    /// Applies `command` for the actor the engine is waiting on.
    ///
    /// Unlocks the engine when the command consumed the turn. Call
    /// [`run`](Self::run) afterwards to resume scheduling.
    pub fn handle_input(&mut self, command: PlayerCommand) -> Result<InputOutcome, EngineError> {
        let actor = self
            .scheduler
            .waiting_on()
            .ok_or(EngineError::NotAwaitingInput)?;

        let Some(origin) = self.map.entity(actor).map(|entity| entity.position()) else {
            self.scheduler.unlock();
            return Ok(InputOutcome::GameOver);
        };

        let consumed = match command {
            PlayerCommand::Move(direction) => {
                try_move(&mut self.context(), actor, origin.step(direction))?
            }
            PlayerCommand::Wait => true,
        };

        if consumed {
            self.scheduler.unlock();
            Ok(InputOutcome::Consumed)
        } else {
            Ok(InputOutcome::Blocked)
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("map", &self.map)
            .field("config", &self.config)
            .field("scheduler", &self.scheduler)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}
