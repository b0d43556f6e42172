use crate::capability::{Behavior, CapabilityKind, attack};
use crate::engine::TurnContext;
use crate::error::{ActionError, MapError};
use crate::state::{EntityId, Position};

/// Lets an entity step onto, attack into, or dig through a neighbouring cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Moveable;

/// Attempts to move `mover` to `target`.
///
/// Exactly one outcome applies, checked in this order:
/// 1. an occupant is present: attack it if the mover is an Attacker, else blocked;
/// 2. the tile is walkable: the mover steps onto it;
/// 3. the tile is diggable: it is dug out and the mover stays put;
/// 4. otherwise blocked.
///
/// A mover aimed at its own cell finds itself as the occupant and is blocked;
/// it never attacks itself.
///
/// Returns whether the action went through. A blocked move is not an error.
pub fn try_move(
    ctx: &mut TurnContext<'_>,
    mover: EntityId,
    target: Position,
) -> Result<bool, ActionError> {
    let can_attack = {
        let entity = ctx
            .map
            .entity(mover)
            .ok_or(MapError::EntityNotFound(mover))?;
        entity.dispatch(Behavior::TryMove);
        entity.has_capability(CapabilityKind::Attacker)
    };

    if let Some(occupant) = ctx.map.entity_at(target.x, target.y) {
        if occupant == mover {
            return Ok(false);
        }
        if !can_attack {
            return Ok(false);
        }
        attack(ctx, mover, occupant)?;
        return Ok(true);
    }

    let tile = ctx.map.tile(target.x, target.y);
    if tile.is_walkable() {
        ctx.map.move_entity(mover, target)?;
        Ok(true)
    } else if tile.is_diggable() {
        Ok(ctx.map.dig(target.x, target.y))
    } else {
        Ok(false)
    }
}
