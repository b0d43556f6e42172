//! Error types for the turn loop.

use crate::error::{ActionError, ErrorSeverity, GameError};
use crate::state::EntityId;

/// Errors surfaced while driving turns or applying player input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("input rejected: the engine is not awaiting input")]
    NotAwaitingInput,

    #[error("engine is locked waiting for input from {actor}")]
    Locked { actor: EntityId },

    #[error("action failed: {0}")]
    Action(#[from] ActionError),
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotAwaitingInput | Self::Locked { .. } => ErrorSeverity::Recoverable,
            Self::Action(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotAwaitingInput => "ENGINE_NOT_AWAITING_INPUT",
            Self::Locked { .. } => "ENGINE_LOCKED",
            Self::Action(error) => error.error_code(),
        }
    }
}
