//! Events emitted during simulation for front-ends to observe.
//!
//! Consumers subscribe to [`GameEvent`] to react to state changes without
//! blocking the worker loop.
use grotto_core::EntityId;

use super::snapshot::MapSnapshot;

/// Events emitted by the runtime during game simulation
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The engine asked the renderer to redraw; carries what it would show.
    Refreshed(MapSnapshot),
    /// The engine is locked until `actor` receives input. `messages` holds
    /// only `actor`'s own queue as it stood when the turn began, before the
    /// turn cleared it.
    AwaitingInput {
        actor: EntityId,
        messages: Vec<String>,
    },
    /// No player-controlled entity remains; further input is rejected.
    GameOver,
}
