//! Static world data and collaborators injected into the core.
//!
//! [`Tile`] and [`Glyph`] describe what a map cell is and how it looks;
//! [`RandomSource`] is the only source of nondeterminism the rules consult.
mod rng;
mod tile;

pub use rng::{PcgRng, RandomSource, ScriptedRng};
pub use tile::{Glyph, Tile};
