//! Actor-group capabilities: what an entity does when its turn comes up.

use std::sync::Arc;

use crate::capability::{Behavior, CapabilityKind, MessageRecipient, send_message_nearby};
use crate::engine::TurnContext;
use crate::error::{ActionError, MapError};
use crate::state::{Direction, Entity, EntityId};
use crate::templates::EntityTemplate;

/// Hands control to the human: re-render, clear the message log, then lock
/// the scheduler until input arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerActor;

/// Stationary growth: occasionally spawns a copy of itself next door.
#[derive(Clone, Debug, PartialEq)]
pub struct FungusActor {
    growths_remaining: u32,
    offspring: Arc<EntityTemplate>,
}

impl FungusActor {
    pub const DEFAULT_GROWTHS: u32 = 5;

    pub fn init(template: &EntityTemplate) -> Self {
        Self {
            growths_remaining: template.growths.unwrap_or(Self::DEFAULT_GROWTHS),
            offspring: Arc::new(template.clone()),
        }
    }

    pub fn growths_remaining(&self) -> u32 {
        self.growths_remaining
    }

    /// Template used for spawned offspring.
    pub fn offspring(&self) -> &EntityTemplate {
        &self.offspring
    }
}

/// Runs `actor`'s turn through whichever Actor capability it carries.
pub fn act(ctx: &mut TurnContext<'_>, actor: EntityId) -> Result<(), ActionError> {
    let entity = ctx
        .map
        .entity(actor)
        .ok_or(MapError::EntityNotFound(actor))?;

    match entity.dispatch(Behavior::Act).kind() {
        CapabilityKind::PlayerActor => player_act(ctx, actor),
        CapabilityKind::FungusActor => fungus_act(ctx, actor),
        other => unreachable!("{other} does not implement act"),
    }
}

fn player_act(ctx: &mut TurnContext<'_>, actor: EntityId) -> Result<(), ActionError> {
    ctx.renderer.refresh(ctx.map);

    if let Some(queue) = ctx
        .map
        .entity_mut(actor)
        .and_then(Entity::capability_mut::<MessageRecipient>)
    {
        queue.clear_messages();
    }

    ctx.scheduler.lock(actor);
    Ok(())
}

fn fungus_act(ctx: &mut TurnContext<'_>, actor: EntityId) -> Result<(), ActionError> {
    let (origin, growths_remaining, offspring) = {
        let entity = ctx
            .map
            .entity(actor)
            .ok_or(MapError::EntityNotFound(actor))?;
        let state: &FungusActor = entity.require(Behavior::Act);
        (
            entity.position(),
            state.growths_remaining,
            Arc::clone(&state.offspring),
        )
    };

    if growths_remaining == 0 {
        return Ok(());
    }
    if ctx.rng.next_f64() > ctx.config.fungus_spread_chance {
        return Ok(());
    }

    let direction = Direction::ALL[ctx.rng.below(Direction::ALL.len())];
    let target = origin.step(direction);
    if !ctx.map.is_empty_floor(target.x, target.y) {
        return Ok(());
    }

    let spawn = Entity::new(&offspring)?.at(target);
    ctx.map.add_entity(spawn)?;

    if let Some(state) = ctx
        .map
        .entity_mut(actor)
        .and_then(Entity::capability_mut::<FungusActor>)
    {
        state.growths_remaining -= 1;
    }

    send_message_nearby(
        ctx.map,
        target,
        ctx.config.message_radius,
        "The fungus is spreading.",
        &[],
    )?;
    Ok(())
}
