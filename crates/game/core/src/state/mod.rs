//! Mutable world state: the map, the entities it owns, and the coordinates
//! they share.
//!
//! All entity additions and removals go through [`Map`]; behaviors reach
//! other entities by [`EntityId`] rather than by reference.
mod common;
mod entity;
mod map;

pub use common::{Direction, EntityId, Position};
pub use entity::Entity;
pub use map::Map;
