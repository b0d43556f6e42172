//! Common error infrastructure for grotto-core.
//!
//! Domain errors live next to the code that raises them
//! ([`FormatError`](crate::format::FormatError),
//! [`EngineError`](crate::engine::EngineError)); the construction and map
//! errors shared by several modules are defined here.
//!
//! Blocked moves and empty lookups are not errors here. They are normal
//! outcomes reported as `false` / `None`.

use crate::capability::{CapabilityGroup, CapabilityKind};
use crate::format::FormatError;
use crate::state::{EntityId, Position};

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// The caller may retry with different input.
    Recoverable,

    /// Invalid input that should be rejected without retry.
    Validation,

    /// Unexpected state inconsistency; indicates a bug.
    Internal,

    /// Construction-time misconfiguration; the offending object cannot exist.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all grotto-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for the error variant, for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Rejected entity construction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("{first} and {second} both belong to the {group} group")]
    DuplicateGroup {
        group: CapabilityGroup,
        first: CapabilityKind,
        second: CapabilityKind,
    },

    #[error("capability {0} listed more than once")]
    DuplicateCapability(CapabilityKind),

    #[error("template field {field} has invalid value {value}")]
    InvalidStat { field: &'static str, value: i64 },
}

impl GameError for TemplateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateGroup { .. } => "TEMPLATE_DUPLICATE_GROUP",
            Self::DuplicateCapability(_) => "TEMPLATE_DUPLICATE_CAPABILITY",
            Self::InvalidStat { .. } => "TEMPLATE_INVALID_STAT",
        }
    }
}

/// Failed map mutation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("position {position} lies outside the {width}x{height} map")]
    OutOfBounds {
        position: Position,
        width: u32,
        height: u32,
    },

    #[error("entity {0} is not on this map")]
    EntityNotFound(EntityId),
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OutOfBounds { .. } => ErrorSeverity::Validation,
            Self::EntityNotFound(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "MAP_OUT_OF_BOUNDS",
            Self::EntityNotFound(_) => "MAP_ENTITY_NOT_FOUND",
        }
    }
}

/// Failure while carrying out a behavior.
///
/// Blocked actions are not errors; these are broken templates, stale ids and
/// malformed message templates.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("message formatting failed: {0}")]
    Format(#[from] FormatError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Map(error) => error.severity(),
            Self::Template(error) => error.severity(),
            Self::Format(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Map(error) => error.error_code(),
            Self::Template(error) => error.error_code(),
            Self::Format(_) => "ACTION_FORMAT",
        }
    }
}
