//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration and workers.

pub mod errors;
pub mod events;
pub mod handle;
pub mod providers;
pub mod snapshot;

pub use errors::{Result, RuntimeError};
pub use events::GameEvent;
pub use handle::RuntimeHandle;
pub use providers::{InputProvider, RandomWalkProvider, ScriptedInputProvider, WaitInputProvider};
pub use snapshot::{EntitySnapshot, MapSnapshot};

pub(crate) use snapshot::EventRenderer;
