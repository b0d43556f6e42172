use crate::capability::{Behavior, CapabilityKind, Destructible, send_message, take_damage};
use crate::engine::TurnContext;
use crate::env::RandomSource;
use crate::error::{ActionError, MapError, TemplateError};
use crate::state::EntityId;
use crate::templates::EntityTemplate;

/// Melee attack strength.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Attacker {
    attack_value: i32,
}

impl Attacker {
    pub const DEFAULT_ATTACK_VALUE: i32 = 1;

    pub fn init(template: &EntityTemplate) -> Result<Self, TemplateError> {
        let attack_value = template
            .attack_value
            .unwrap_or(Self::DEFAULT_ATTACK_VALUE);
        if attack_value < 0 {
            return Err(TemplateError::InvalidStat {
                field: "attack_value",
                value: i64::from(attack_value),
            });
        }
        Ok(Self { attack_value })
    }

    pub fn attack_value(&self) -> i32 {
        self.attack_value
    }
}

/// Rolls melee damage.
///
/// ```text
/// damage = 1 + floor(r * max(0, attack - defense)),  r in [0, 1)
/// ```
///
/// At least 1, at most `max(1, attack - defense)`.
pub fn roll_damage(attack: i32, defense: i32, rng: &mut dyn RandomSource) -> i32 {
    let spread = attack.saturating_sub(defense).max(0);
    let roll = (rng.next_f64() * f64::from(spread)).floor() as i32;
    1 + roll.min(spread.saturating_sub(1)).max(0)
}

/// `attacker` strikes `target`. Targets without Destructible are ignored.
pub fn attack(
    ctx: &mut TurnContext<'_>,
    attacker: EntityId,
    target: EntityId,
) -> Result<(), ActionError> {
    let (attack_value, attacker_name) = {
        let entity = ctx
            .map
            .entity(attacker)
            .ok_or(MapError::EntityNotFound(attacker))?;
        let state: &Attacker = entity.require(Behavior::Attack);
        (state.attack_value(), entity.name().to_owned())
    };

    let (defense_value, target_name) = {
        let entity = ctx
            .map
            .entity(target)
            .ok_or(MapError::EntityNotFound(target))?;
        if !entity.has_capability(CapabilityKind::Destructible) {
            return Ok(());
        }
        let state: &Destructible = entity.require(Behavior::DefenseValue);
        (state.defense_value(), entity.name().to_owned())
    };

    let damage = roll_damage(attack_value, defense_value, &mut *ctx.rng);

    send_message(
        ctx.map,
        attacker,
        "You hit the %s for %d damage!",
        &[target_name.into(), damage.into()],
    )?;
    send_message(
        ctx.map,
        target,
        "The %s hits you for %d damage!",
        &[attacker_name.into(), damage.into()],
    )?;

    take_damage(ctx.map, target, attacker, damage)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::MessageRecipient;
    use crate::engine::test_support::Harness;
    use crate::env::ScriptedRng;
    use crate::state::Position;

    const DRAWS: [f64; 6] = [0.0, 0.1, 0.35, 0.5, 0.9, 0.999_999];

    #[test]
    fn damage_spans_one_to_spread_when_attack_exceeds_defense() {
        let mut rng = ScriptedRng::new(DRAWS.to_vec());
        let rolls: Vec<i32> = DRAWS.iter().map(|_| roll_damage(10, 0, &mut rng)).collect();

        assert_eq!(rolls, vec![1, 2, 4, 6, 10, 10]);
        assert!(rolls.iter().all(|damage| (1..=10).contains(damage)));
    }

    #[test]
    fn damage_is_exactly_one_when_defense_matches_or_beats_attack() {
        let mut rng = ScriptedRng::new(DRAWS.to_vec());
        for _ in DRAWS {
            assert_eq!(roll_damage(5, 5, &mut rng), 1);
            assert_eq!(roll_damage(5, 9, &mut rng), 1);
        }
    }

    #[test]
    fn attack_messages_both_sides_then_applies_damage() {
        let mut harness = Harness::floor(3, 3).with_draws(vec![0.0]);
        let player = harness.spawn(&EntityTemplate::player(), Position::new(1, 1));
        let mut rival = EntityTemplate::player();
        rival.name = "rival".to_owned();
        let rival = harness.spawn(&rival, Position::new(1, 0));

        attack(&mut harness.ctx(), player, rival).unwrap();

        let attacker_log = harness.map.entity(player).unwrap().capability::<MessageRecipient>().unwrap();
        assert_eq!(attacker_log.messages(), ["You hit the rival for 1 damage!"]);
        let rival = harness.map.entity(rival).unwrap();
        assert_eq!(
            rival.capability::<MessageRecipient>().unwrap().messages(),
            ["The player hits you for 1 damage!"]
        );
        assert_eq!(rival.capability::<Destructible>().unwrap().hp(), 39);
    }

    #[test]
    fn targets_without_destructible_are_ignored() {
        let mut harness = Harness::floor(3, 3);
        let player = harness.spawn(&EntityTemplate::player(), Position::new(1, 1));
        let ghost = EntityTemplate {
            name: "ghost".to_owned(),
            capabilities: vec![CapabilityKind::MessageRecipient],
            ..EntityTemplate::default()
        };
        let ghost = harness.spawn(&ghost, Position::new(1, 0));

        attack(&mut harness.ctx(), player, ghost).unwrap();

        let log = harness.map.entity(player).unwrap().capability::<MessageRecipient>().unwrap();
        assert!(log.messages().is_empty());
        assert_eq!(harness.rng.draws(), 0);
    }

    #[test]
    fn negative_attack_values_are_rejected() {
        let template = EntityTemplate {
            attack_value: Some(-1),
            capabilities: vec![CapabilityKind::Attacker],
            ..EntityTemplate::default()
        };
        assert_eq!(
            Attacker::init(&template),
            Err(TemplateError::InvalidStat {
                field: "attack_value",
                value: -1
            })
        );
    }
}
