//! Static terrain descriptors.

/// Display glyph shared by tiles and entities.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glyph {
    pub character: char,
    pub foreground: String,
    pub background: String,
}

impl Glyph {
    pub const DEFAULT_FOREGROUND: &'static str = "white";
    pub const DEFAULT_BACKGROUND: &'static str = "black";

    pub fn new(
        character: char,
        foreground: impl Into<String>,
        background: impl Into<String>,
    ) -> Self {
        Self {
            character,
            foreground: foreground.into(),
            background: background.into(),
        }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::new(' ', Self::DEFAULT_FOREGROUND, Self::DEFAULT_BACKGROUND)
    }
}

/// Immutable terrain kinds.
///
/// The set is closed: every cell of a [`Map`](crate::state::Map) holds one of
/// these values, and lookups outside the grid answer [`Tile::Null`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Tile {
    /// Boundary / unset cell. Neither walkable nor diggable.
    #[default]
    Null,
    Floor,
    Wall,
}

impl Tile {
    pub const fn is_walkable(self) -> bool {
        matches!(self, Tile::Floor)
    }

    pub const fn is_diggable(self) -> bool {
        matches!(self, Tile::Wall)
    }

    /// Tile left behind after digging, if this tile can be dug at all.
    pub const fn dig_result(self) -> Option<Tile> {
        match self {
            Tile::Wall => Some(Tile::Floor),
            Tile::Null | Tile::Floor => None,
        }
    }

    pub fn glyph(self) -> Glyph {
        match self {
            Tile::Null => Glyph::default(),
            Tile::Floor => Glyph::new('.', Glyph::DEFAULT_FOREGROUND, Glyph::DEFAULT_BACKGROUND),
            Tile::Wall => Glyph::new('#', "goldenrod", Glyph::DEFAULT_BACKGROUND),
        }
    }

    /// Parses a layout character: `#` wall, `.` floor, anything else null.
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            '#' => Tile::Wall,
            '.' => Tile::Floor,
            _ => Tile::Null,
        }
    }
}
