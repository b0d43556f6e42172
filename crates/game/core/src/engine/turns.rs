use crate::capability::Behavior;
use crate::state::{EntityId, Map};

/// The engine lock.
///
/// `Locked` is entered only by a player-controlled actor at the start of its
/// turn, and left only through [`Engine::handle_input`](super::Engine::handle_input)
/// once that input consumed the turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SchedulerLock {
    #[default]
    Unlocked,
    Locked {
        actor: EntityId,
    },
}

impl SchedulerLock {
    pub fn lock(&mut self, actor: EntityId) {
        *self = SchedulerLock::Locked { actor };
    }

    /// Releases the lock, returning the actor that held it.
    pub fn unlock(&mut self) -> Option<EntityId> {
        let waiting = self.waiting_on();
        *self = SchedulerLock::Unlocked;
        waiting
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, SchedulerLock::Locked { .. })
    }

    pub fn waiting_on(&self) -> Option<EntityId> {
        match *self {
            SchedulerLock::Locked { actor } => Some(actor),
            SchedulerLock::Unlocked => None,
        }
    }
}

/// Selects the next actor in round-robin order.
///
/// Actors are visited in ascending id order, starting strictly after
/// `cursor` and wrapping to the lowest id. Entities spawned mid-cycle have
/// larger ids and therefore join the end of the current cycle; removed
/// entities are simply absent.
pub(crate) fn next_actor(map: &Map, cursor: Option<EntityId>) -> Option<EntityId> {
    let mut actors = map
        .entities()
        .filter(|(_, entity)| entity.responds_to(Behavior::Act))
        .map(|(id, _)| id);

    let Some(cursor) = cursor else {
        return actors.next();
    };

    let mut first = None;
    for id in actors {
        if id > cursor {
            return Some(id);
        }
        first.get_or_insert(id);
    }
    first
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Entity, Position};
    use crate::templates::EntityTemplate;

    fn map_with_actors() -> (Map, Vec<EntityId>) {
        let mut map = Map::floor(5, 1);
        let rock = EntityTemplate {
            name: "rock".to_owned(),
            ..EntityTemplate::default()
        };
        let templates = [
            EntityTemplate::fungus(),
            rock,
            EntityTemplate::player(),
            EntityTemplate::fungus(),
        ];
        let ids = templates
            .iter()
            .enumerate()
            .map(|(x, template)| {
                map.add_entity(Entity::new(template).unwrap().at(Position::new(x as i32, 0)))
                    .unwrap()
            })
            .collect();
        (map, ids)
    }

    #[test]
    fn lock_round_trip() {
        let mut lock = SchedulerLock::default();
        assert!(!lock.is_locked());

        lock.lock(EntityId(3));
        assert_eq!(lock.waiting_on(), Some(EntityId(3)));
        assert_eq!(lock.unlock(), Some(EntityId(3)));
        assert_eq!(lock.unlock(), None);
    }

    #[test]
    fn rotation_skips_non_actors_and_wraps() {
        let (map, ids) = map_with_actors();

        let mut cursor = None;
        let mut order = Vec::new();
        for _ in 0..4 {
            cursor = next_actor(&map, cursor);
            order.push(cursor.unwrap());
        }

        assert_eq!(order, vec![ids[0], ids[2], ids[3], ids[0]]);
    }

    #[test]
    fn removed_actors_drop_out_of_the_rotation() {
        let (mut map, ids) = map_with_actors();
        map.remove_entity(ids[2]);

        assert_eq!(next_actor(&map, Some(ids[0])), Some(ids[3]));
        // cursor entity itself may be gone
        map.remove_entity(ids[3]);
        assert_eq!(next_actor(&map, Some(ids[3])), Some(ids[0]));
    }

    #[test]
    fn empty_map_has_no_actor() {
        assert_eq!(next_actor(&Map::floor(2, 2), None), None);
    }
}
