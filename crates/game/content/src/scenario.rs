//! Populating a map with its starting cast.

use anyhow::Context;
use grotto_core::{Entity, EntityId, EntityTemplate, Map, RandomSource};

use crate::loaders::LoadResult;

/// A populated map ready to hand to an engine.
#[derive(Debug)]
pub struct Scenario {
    pub map: Map,
    pub player: EntityId,
    pub fungi: Vec<EntityId>,
}

/// Places the player and a number of fungi on random empty floor cells.
#[derive(Clone, Debug)]
pub struct ScenarioBuilder {
    map: Map,
    player: EntityTemplate,
    fungus: EntityTemplate,
    fungus_count: usize,
}

impl ScenarioBuilder {
    pub const DEFAULT_FUNGUS_COUNT: usize = 25;

    pub fn new(map: Map) -> Self {
        Self {
            map,
            player: EntityTemplate::player(),
            fungus: EntityTemplate::fungus(),
            fungus_count: Self::DEFAULT_FUNGUS_COUNT,
        }
    }

    pub fn player(mut self, template: EntityTemplate) -> Self {
        self.player = template;
        self
    }

    pub fn fungus(mut self, template: EntityTemplate) -> Self {
        self.fungus = template;
        self
    }

    pub fn fungus_count(mut self, count: usize) -> Self {
        self.fungus_count = count;
        self
    }

    /// Player first, so it gets the lowest id and acts first each cycle.
    pub fn build(self, rng: &mut dyn RandomSource) -> LoadResult<Scenario> {
        let Self {
            mut map,
            player,
            fungus,
            fungus_count,
        } = self;

        let player = place(&mut map, &player, rng).context("Failed to place the player")?;

        let mut fungi = Vec::with_capacity(fungus_count);
        for index in 0..fungus_count {
            let id = place(&mut map, &fungus, rng).with_context(|| {
                format!("Failed to place fungus {} of {}", index + 1, fungus_count)
            })?;
            fungi.push(id);
        }

        tracing::info!(
            width = map.width(),
            height = map.height(),
            fungi = fungi.len(),
            "scenario populated"
        );
        Ok(Scenario { map, player, fungi })
    }
}

fn place(
    map: &mut Map,
    template: &EntityTemplate,
    rng: &mut dyn RandomSource,
) -> LoadResult<EntityId> {
    let position = map
        .random_floor_position(rng)
        .context("no empty floor cell left")?;
    let entity = Entity::new(template)?.at(position);
    Ok(map.add_entity(entity)?)
}
