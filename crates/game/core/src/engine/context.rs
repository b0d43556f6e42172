use crate::config::GameConfig;
use crate::env::RandomSource;
use crate::state::Map;

use super::SchedulerLock;

/// Screen collaborator. Called whenever a player-controlled actor is about to
/// wait for input; the return value is never consulted.
pub trait Renderer {
    fn refresh(&mut self, map: &Map);
}

/// Renderer that draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn refresh(&mut self, _map: &Map) {}
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn refresh(&mut self, map: &Map) {
        (**self).refresh(map);
    }
}

/// Everything a behavior may touch during one turn.
pub struct TurnContext<'a> {
    pub map: &'a mut Map,
    pub rng: &'a mut dyn RandomSource,
    pub renderer: &'a mut dyn Renderer,
    pub config: &'a GameConfig,
    pub scheduler: &'a mut SchedulerLock,
}
