use std::collections::BTreeMap;

use crate::env::{RandomSource, Tile};
use crate::error::MapError;
use crate::state::{Entity, EntityId, Position};

/// Tile grid plus the entities living on it.
///
/// The map exclusively owns its entities. Every stored entity sits inside
/// `[0, width) x [0, height)`; positions are only changed through
/// [`Map::move_entity`], which re-checks the bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct Map {
    width: u32,
    height: u32,
    /// Row-major: index `y * width + x`.
    tiles: Vec<Tile>,
    entities: BTreeMap<EntityId, Entity>,
    next_id: u32,
}

impl Map {
    /// A `width` x `height` map filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Tile) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            tiles: vec![fill; len],
            entities: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn floor(width: u32, height: u32) -> Self {
        Self::new(width, height, Tile::Floor)
    }

    /// Builds a map from `columns[x][y]`. Short columns are padded with
    /// [`Tile::Null`], so an unset cell still reads as a real tile.
    pub fn from_columns(columns: Vec<Vec<Tile>>) -> Self {
        let width = columns.len() as u32;
        let height = columns.iter().map(Vec::len).max().unwrap_or(0) as u32;
        let mut map = Self::new(width, height, Tile::Null);
        for (x, column) in columns.into_iter().enumerate() {
            for (y, tile) in column.into_iter().enumerate() {
                let index = map.index_unchecked(x, y);
                map.tiles[index] = tile;
            }
        }
        map
    }

    /// Builds a map from symbol rows, one string per `y`. See [`Tile::from_symbol`].
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let width = rows
            .iter()
            .map(|row| row.as_ref().chars().count())
            .max()
            .unwrap_or(0) as u32;
        let mut map = Self::new(width, rows.len() as u32, Tile::Null);
        for (y, row) in rows.iter().enumerate() {
            for (x, symbol) in row.as_ref().chars().enumerate() {
                let index = map.index_unchecked(x, y);
                map.tiles[index] = Tile::from_symbol(symbol);
            }
        }
        map
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.contains(x, y)
            .then(|| self.index_unchecked(x as usize, y as usize))
    }

    fn index_unchecked(&self, x: usize, y: usize) -> usize {
        y * self.width as usize + x
    }

    fn out_of_bounds(&self, position: Position) -> MapError {
        MapError::OutOfBounds {
            position,
            width: self.width,
            height: self.height,
        }
    }

    /// Tile at `(x, y)`, or [`Tile::Null`] outside the grid.
    pub fn tile(&self, x: i32, y: i32) -> Tile {
        self.index(x, y)
            .map_or(Tile::Null, |index| self.tiles[index])
    }

    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) -> Result<(), MapError> {
        let index = self
            .index(x, y)
            .ok_or_else(|| self.out_of_bounds(Position::new(x, y)))?;
        self.tiles[index] = tile;
        Ok(())
    }

    /// Replaces a diggable tile with its dig result. Returns `false` (and
    /// changes nothing) when the tile cannot be dug.
    pub fn dig(&mut self, x: i32, y: i32) -> bool {
        let Some(index) = self.index(x, y) else {
            return false;
        };
        match self.tiles[index].dig_result() {
            Some(result) => {
                self.tiles[index] = result;
                true
            }
            None => false,
        }
    }

    /// Walkable and unoccupied.
    pub fn is_empty_floor(&self, x: i32, y: i32) -> bool {
        self.tile(x, y).is_walkable() && self.entity_at(x, y).is_none()
    }

    /// Takes ownership of `entity` and returns its fresh id.
    pub fn add_entity(&mut self, entity: Entity) -> Result<EntityId, MapError> {
        let position = entity.position();
        if !self.contains(position.x, position.y) {
            return Err(self.out_of_bounds(position));
        }

        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, entity);
        Ok(id)
    }

    /// Hands the entity back to the caller. `None` if it is not on this map.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// First entity (lowest id) standing on `(x, y)`.
    pub fn entity_at(&self, x: i32, y: i32) -> Option<EntityId> {
        let target = Position::new(x, y);
        self.entities
            .iter()
            .find(|(_, entity)| entity.position() == target)
            .map(|(&id, _)| id)
    }

    /// Live entities in ascending id order.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.entities.iter().map(|(&id, entity)| (id, entity))
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Ids of every entity within Chebyshev distance `radius` of `(cx, cy)`,
    /// in ascending id order.
    pub fn entities_within_radius(&self, cx: i32, cy: i32, radius: u32) -> Vec<EntityId> {
        let center = Position::new(cx, cy);
        self.entities
            .iter()
            .filter(|(_, entity)| entity.position().chebyshev_distance(center) <= radius)
            .map(|(&id, _)| id)
            .collect()
    }

    /// Moves `id` to `to`. Occupancy is not checked here; movement behaviors
    /// resolve occupants before calling this.
    pub fn move_entity(&mut self, id: EntityId, to: Position) -> Result<(), MapError> {
        if !self.contains(to.x, to.y) {
            return Err(self.out_of_bounds(to));
        }
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(MapError::EntityNotFound(id))?;
        entity.set_position(to);
        Ok(())
    }

    /// A uniformly chosen empty floor cell, or `None` when there is none.
    pub fn random_floor_position(&self, rng: &mut dyn RandomSource) -> Option<Position> {
        let candidates: Vec<Position> = (0..self.height as i32)
            .flat_map(|y| (0..self.width as i32).map(move |x| Position::new(x, y)))
            .filter(|position| self.is_empty_floor(position.x, position.y))
            .collect();
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[rng.below(candidates.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRng;
    use crate::templates::EntityTemplate;

    fn fungus_at(x: i32, y: i32) -> Entity {
        Entity::new(&EntityTemplate::fungus())
            .unwrap()
            .at(Position::new(x, y))
    }

    #[test]
    fn out_of_range_tiles_read_as_null() {
        let map = Map::floor(4, 3);
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 3), (i32::MAX, i32::MIN)] {
            assert_eq!(map.tile(x, y), Tile::Null, "({x}, {y})");
        }
        assert_eq!(map.tile(3, 2), Tile::Floor);
    }

    #[test]
    fn short_columns_are_padded_with_null() {
        let map = Map::from_columns(vec![
            vec![Tile::Floor, Tile::Wall],
            vec![Tile::Floor],
        ]);
        assert_eq!((map.width(), map.height()), (2, 2));
        assert_eq!(map.tile(0, 1), Tile::Wall);
        assert_eq!(map.tile(1, 1), Tile::Null);
    }

    #[test]
    fn rows_parse_symbols() {
        let map = Map::from_rows(&["#.#", "..."]);
        assert_eq!(map.tile(0, 0), Tile::Wall);
        assert_eq!(map.tile(1, 0), Tile::Floor);
        assert_eq!(map.tile(2, 1), Tile::Floor);
    }

    #[test]
    fn dig_only_touches_diggable_tiles() {
        let mut map = Map::from_rows(&["#."]);
        assert!(map.dig(0, 0));
        assert_eq!(map.tile(0, 0), Tile::Floor);
        assert!(!map.dig(1, 0));
        assert!(!map.dig(5, 5));
    }

    #[test]
    fn entities_outside_the_grid_are_rejected() {
        let mut map = Map::floor(2, 2);
        assert_eq!(
            map.add_entity(fungus_at(2, 0)),
            Err(MapError::OutOfBounds {
                position: Position::new(2, 0),
                width: 2,
                height: 2
            })
        );
        assert_eq!(map.entity_count(), 0);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut map = Map::floor(3, 3);
        let first = map.add_entity(fungus_at(0, 0)).unwrap();
        assert!(map.remove_entity(first).is_some());
        let second = map.add_entity(fungus_at(0, 0)).unwrap();

        assert_ne!(first, second);
        assert!(map.entity(first).is_none());
        assert!(map.remove_entity(first).is_none());
    }

    #[test]
    fn occupancy_drives_empty_floor() {
        let mut map = Map::from_rows(&["..#"]);
        let id = map.add_entity(fungus_at(0, 0)).unwrap();

        assert_eq!(map.entity_at(0, 0), Some(id));
        assert_eq!(map.entity_at(1, 0), None);
        assert!(!map.is_empty_floor(0, 0));
        assert!(map.is_empty_floor(1, 0));
        assert!(!map.is_empty_floor(2, 0));
        assert!(!map.is_empty_floor(9, 0));
    }

    #[test]
    fn move_entity_updates_position_within_bounds() {
        let mut map = Map::floor(3, 3);
        let id = map.add_entity(fungus_at(0, 0)).unwrap();

        map.move_entity(id, Position::new(2, 2)).unwrap();
        assert_eq!(map.entity_at(2, 2), Some(id));
        assert!(map.move_entity(id, Position::new(3, 0)).is_err());
        assert_eq!(
            map.move_entity(EntityId(99), Position::ORIGIN),
            Err(MapError::EntityNotFound(EntityId(99)))
        );
    }

    #[test]
    fn radius_query_is_square() {
        let mut map = Map::floor(10, 10);
        let corner = map.add_entity(fungus_at(7, 7)).unwrap();
        let edge = map.add_entity(fungus_at(5, 2)).unwrap();
        map.add_entity(fungus_at(8, 5)).unwrap();

        assert_eq!(map.entities_within_radius(5, 5, 2), vec![corner]);
        assert_eq!(map.entities_within_radius(5, 5, 3).len(), 3);
        assert!(map.entities_within_radius(5, 5, 3).contains(&edge));
    }

    #[test]
    fn random_floor_position_skips_walls_and_occupants() {
        let mut map = Map::from_rows(&["#.", ".."]);
        map.add_entity(fungus_at(1, 0)).unwrap();
        // candidates in row-major order: (0, 1), (1, 1)
        let mut rng = ScriptedRng::new(vec![0.0, 0.9]);

        assert_eq!(map.random_floor_position(&mut rng), Some(Position::new(0, 1)));
        assert_eq!(map.random_floor_position(&mut rng), Some(Position::new(1, 1)));
        assert_eq!(Map::new(2, 2, Tile::Wall).random_floor_position(&mut rng), None);
    }
}
