//! Read-only views of the map handed to front-ends.

use grotto_core::{Entity, EntityId, Map, MessageRecipient, Position, Renderer};
use serde::Serialize;
use tokio::sync::broadcast;

use super::events::GameEvent;

/// One entity as a front-end sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub name: String,
    pub character: char,
    pub foreground: String,
    pub position: Position,
    pub hp: Option<i32>,
    pub max_hp: Option<i32>,
    /// The entity's own message queue; empty for non-recipients.
    pub messages: Vec<String>,
}

impl EntitySnapshot {
    fn capture(id: EntityId, entity: &Entity) -> Self {
        Self {
            id,
            name: entity.name().to_owned(),
            character: entity.glyph().character,
            foreground: entity.glyph().foreground.clone(),
            position: entity.position(),
            hp: entity.hp(),
            max_hp: entity.max_hp(),
            messages: entity
                .capability::<MessageRecipient>()
                .map(|queue| queue.messages().to_vec())
                .unwrap_or_default(),
        }
    }
}

/// Terrain, entities and pending messages at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MapSnapshot {
    pub width: u32,
    pub height: u32,
    /// Terrain glyphs, one string per row.
    pub terrain: Vec<String>,
    pub entities: Vec<EntitySnapshot>,
    /// Queued messages of every message recipient, in entity id order.
    pub messages: Vec<String>,
}

impl MapSnapshot {
    pub fn capture(map: &Map) -> Self {
        let terrain = (0..map.height() as i32)
            .map(|y| {
                (0..map.width() as i32)
                    .map(|x| map.tile(x, y).glyph().character)
                    .collect()
            })
            .collect();

        let entities = map
            .entities()
            .map(|(id, entity)| EntitySnapshot::capture(id, entity))
            .collect();

        let messages = map
            .entities()
            .filter_map(|(_, entity)| entity.capability::<MessageRecipient>())
            .flat_map(|queue| queue.messages().iter().cloned())
            .collect();

        Self {
            width: map.width(),
            height: map.height(),
            terrain,
            entities,
            messages,
        }
    }

    pub fn entity(&self, id: EntityId) -> Option<&EntitySnapshot> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    /// Messages queued for `id` alone. Empty when `id` is gone or cannot
    /// receive messages.
    pub fn messages_for(&self, id: EntityId) -> Vec<String> {
        self.entity(id)
            .map(|entity| entity.messages.clone())
            .unwrap_or_default()
    }

    /// Terrain with entity glyphs drawn on top, lowest id last so it wins.
    pub fn render_ascii(&self) -> String {
        let mut rows: Vec<Vec<char>> = self
            .terrain
            .iter()
            .map(|row| row.chars().collect())
            .collect();

        for entity in self.entities.iter().rev() {
            let Position { x, y } = entity.position;
            if let Some(cell) = rows
                .get_mut(y as usize)
                .and_then(|row| row.get_mut(x as usize))
            {
                *cell = entity.character;
            }
        }

        rows.into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Renderer that publishes each refresh as a [`GameEvent::Refreshed`] and
/// remembers the latest snapshot for the worker.
pub(crate) struct EventRenderer {
    event_tx: broadcast::Sender<GameEvent>,
    latest: std::sync::Arc<std::sync::Mutex<MapSnapshot>>,
}

impl EventRenderer {
    pub(crate) fn new(
        event_tx: broadcast::Sender<GameEvent>,
        latest: std::sync::Arc<std::sync::Mutex<MapSnapshot>>,
    ) -> Self {
        Self { event_tx, latest }
    }
}

impl Renderer for EventRenderer {
    fn refresh(&mut self, map: &Map) {
        let snapshot = MapSnapshot::capture(map);
        match self.latest.lock() {
            Ok(mut latest) => *latest = snapshot.clone(),
            Err(poisoned) => *poisoned.into_inner() = snapshot.clone(),
        }
        // No subscribers is fine.
        let _ = self.event_tx.send(GameEvent::Refreshed(snapshot));
    }
}

#[cfg(test)]
mod tests {
    use grotto_core::EntityTemplate;

    use super::*;

    fn sample_map() -> (Map, EntityId) {
        let mut map = Map::from_rows(&["###", "#.#", "###"]);
        let player = Entity::new(&EntityTemplate::player())
            .unwrap()
            .at(Position::new(1, 1));
        let id = map.add_entity(player).unwrap();
        map.entity_mut(id)
            .and_then(Entity::capability_mut::<MessageRecipient>)
            .unwrap()
            .receive_message("welcome");
        (map, id)
    }

    #[test]
    fn capture_draws_entities_over_terrain() {
        let (map, id) = sample_map();
        let snapshot = MapSnapshot::capture(&map);

        assert_eq!(snapshot.render_ascii(), "###\n#@#\n###");
        assert_eq!(snapshot.messages, vec!["welcome".to_owned()]);
        assert_eq!(snapshot.entity(id).unwrap().hp, Some(40));
    }

    #[test]
    fn snapshots_serialize_to_json() {
        let (map, _) = sample_map();
        let json = serde_json::to_value(MapSnapshot::capture(&map)).unwrap();

        assert_eq!(json["width"], 3);
        assert_eq!(json["entities"][0]["name"], "player");
        assert_eq!(json["entities"][0]["position"]["x"], 1);
    }

    #[test]
    fn per_entity_messages_stay_with_their_recipient() {
        let (mut map, first) = sample_map();
        let second = Entity::new(&EntityTemplate::player())
            .unwrap()
            .at(Position::new(1, 1));
        let second = map.add_entity(second).unwrap();
        map.entity_mut(second)
            .and_then(Entity::capability_mut::<MessageRecipient>)
            .unwrap()
            .receive_message("second only");

        let snapshot = MapSnapshot::capture(&map);
        assert_eq!(snapshot.messages_for(first), vec!["welcome".to_owned()]);
        assert_eq!(snapshot.messages_for(second), vec!["second only".to_owned()]);
        assert_eq!(snapshot.messages.len(), 2);
    }
}
