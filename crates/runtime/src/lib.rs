//! Async runtime for the grotto simulation.
//!
//! This crate moves the [`grotto_core::Engine`] onto a background worker and
//! exposes it through channels. Consumers embed [`Runtime`] to drive player
//! turns with an [`InputProvider`], subscribe to [`GameEvent`]s, and inspect
//! the world through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`random`] adapts `rand` to the engine's random source
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod random;
pub mod runtime;

mod workers;

pub use api::{
    EntitySnapshot, GameEvent, InputProvider, MapSnapshot, RandomWalkProvider, Result,
    RuntimeError, RuntimeHandle, ScriptedInputProvider, WaitInputProvider,
};
pub use random::SeededRandom;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
