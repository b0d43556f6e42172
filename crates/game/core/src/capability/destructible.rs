use crate::capability::{Behavior, send_message};
use crate::error::{ActionError, MapError, TemplateError};
use crate::state::{EntityId, Map};
use crate::templates::EntityTemplate;

/// Hit points and defense. An entity whose hp drops to zero or below is
/// removed from its map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Destructible {
    max_hp: i32,
    hp: i32,
    defense_value: i32,
}

impl Destructible {
    pub const DEFAULT_MAX_HP: i32 = 10;
    pub const DEFAULT_DEFENSE_VALUE: i32 = 0;

    pub fn init(template: &EntityTemplate) -> Result<Self, TemplateError> {
        let max_hp = template.max_hp.unwrap_or(Self::DEFAULT_MAX_HP);
        if max_hp <= 0 {
            return Err(TemplateError::InvalidStat {
                field: "max_hp",
                value: i64::from(max_hp),
            });
        }

        // hp may start below max_hp, e.g. for wounded spawns
        let hp = template.hp.unwrap_or(max_hp);
        if hp <= 0 {
            return Err(TemplateError::InvalidStat {
                field: "hp",
                value: i64::from(hp),
            });
        }

        let defense_value = template
            .defense_value
            .unwrap_or(Self::DEFAULT_DEFENSE_VALUE);
        if defense_value < 0 {
            return Err(TemplateError::InvalidStat {
                field: "defense_value",
                value: i64::from(defense_value),
            });
        }

        Ok(Self {
            max_hp,
            hp,
            defense_value,
        })
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn defense_value(&self) -> i32 {
        self.defense_value
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Subtracts `damage`; hp is not clamped at zero.
    fn apply(&mut self, damage: i32) {
        self.hp -= damage;
    }
}

/// Applies `damage` to `target`, crediting `attacker` with the kill.
///
/// Returns `true` when the target died and was removed from `map`. A target
/// that is no longer on the map is an error, so a removed entity can never
/// die twice.
pub fn take_damage(
    map: &mut Map,
    target: EntityId,
    attacker: EntityId,
    damage: i32,
) -> Result<bool, ActionError> {
    let (died, name) = {
        let entity = map
            .entity_mut(target)
            .ok_or(MapError::EntityNotFound(target))?;
        let name = entity.name().to_owned();
        let state: &mut Destructible = entity.require_mut(Behavior::TakeDamage);
        state.apply(damage);
        (state.is_dead(), name)
    };

    if !died {
        return Ok(false);
    }

    send_message(map, attacker, "You kill the %s!", &[name.into()])?;
    send_message(map, target, "You die!", &[])?;
    map.remove_entity(target)
        .ok_or(MapError::EntityNotFound(target))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{CapabilityKind, MessageRecipient};
    use crate::state::{Entity, Position};

    fn map_with(templates: &[(&EntityTemplate, Position)]) -> (Map, Vec<EntityId>) {
        let mut map = Map::floor(5, 5);
        let ids = templates
            .iter()
            .map(|(template, position)| {
                map.add_entity(Entity::new(template).unwrap().at(*position))
                    .unwrap()
            })
            .collect();
        (map, ids)
    }

    #[test]
    fn survivable_damage_only_lowers_hp() {
        let (mut map, ids) = map_with(&[
            (&EntityTemplate::player(), Position::new(0, 0)),
            (&EntityTemplate::fungus(), Position::new(1, 0)),
        ]);

        let died = take_damage(&mut map, ids[1], ids[0], 3).unwrap();

        assert!(!died);
        let fungus = map.entity(ids[1]).unwrap();
        assert_eq!(fungus.capability::<Destructible>().unwrap().hp(), 7);
        let log = map.entity(ids[0]).unwrap().capability::<MessageRecipient>().unwrap();
        assert!(log.messages().is_empty());
    }

    #[test]
    fn lethal_damage_removes_exactly_once() {
        let mut frail = EntityTemplate::fungus();
        frail.hp = Some(1);
        let (mut map, ids) = map_with(&[
            (&EntityTemplate::player(), Position::new(0, 0)),
            (&frail, Position::new(1, 0)),
        ]);

        assert!(take_damage(&mut map, ids[1], ids[0], 1).unwrap());
        assert!(map.entity(ids[1]).is_none());
        assert_eq!(map.entity_count(), 1);

        let again = take_damage(&mut map, ids[1], ids[0], 1);
        assert_eq!(again, Err(ActionError::Map(MapError::EntityNotFound(ids[1]))));
        assert_eq!(map.entity_count(), 1);

        let log = map.entity(ids[0]).unwrap().capability::<MessageRecipient>().unwrap();
        assert_eq!(log.messages(), ["You kill the fungus!"]);
    }

    #[test]
    fn hp_may_go_negative_before_removal() {
        let mut target = EntityTemplate::player();
        target.hp = Some(2);
        let mut state = Destructible::init(&target).unwrap();
        state.apply(5);
        assert_eq!(state.hp(), -3);
        assert!(state.is_dead());
    }

    #[test]
    fn template_defaults_and_validation() {
        let bare = EntityTemplate {
            capabilities: vec![CapabilityKind::Destructible],
            ..EntityTemplate::default()
        };
        let state = Destructible::init(&bare).unwrap();
        assert_eq!((state.max_hp(), state.hp(), state.defense_value()), (10, 10, 0));

        let broken = EntityTemplate {
            max_hp: Some(0),
            ..bare
        };
        assert_eq!(
            Destructible::init(&broken),
            Err(TemplateError::InvalidStat {
                field: "max_hp",
                value: 0
            })
        );
    }
}
