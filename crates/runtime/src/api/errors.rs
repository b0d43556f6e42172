//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, the engine, and input providers
//! so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use grotto_core::EngineError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime requires a map to be configured before building")]
    MissingMap,

    #[error("player input provider not set")]
    ProviderNotSet,

    #[error("input provider failed: {0}")]
    Provider(String),

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("the game is over")]
    GameOver,

    #[error(transparent)]
    Engine(#[from] EngineError),
}
