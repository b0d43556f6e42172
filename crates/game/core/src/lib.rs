//! Entity and behavior rules for the grotto roguelike.
//!
//! `grotto-core` defines the map, the closed set of entity capabilities, the
//! combat and messaging protocols between them, and the round-robin
//! [`Engine`] that drives turns. It performs no I/O; randomness and rendering
//! are injected through [`RandomSource`] and [`Renderer`].
pub mod capability;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod format;
pub mod state;
pub mod templates;

pub use capability::{
    Attacker, Behavior, Capability, CapabilityGroup, CapabilityKind, CapabilitySet,
    CapabilityState, Destructible, FungusActor, MessageRecipient, Moveable, PlayerActor,
};
pub use config::GameConfig;
pub use engine::{
    Engine, EngineError, EngineStatus, InputOutcome, NullRenderer, PlayerCommand, Renderer,
    SchedulerLock, TurnContext,
};
pub use env::{Glyph, PcgRng, RandomSource, ScriptedRng, Tile};
pub use error::{ActionError, ErrorSeverity, GameError, MapError, TemplateError};
pub use format::{FormatError, MessageArg, format_message};
pub use state::{Direction, Entity, EntityId, Map, Position};
pub use templates::EntityTemplate;
