use crate::capability::{
    Attacker, Behavior, Capability, CapabilityKind, CapabilitySet, CapabilityState, Destructible,
};
use crate::env::Glyph;
use crate::error::TemplateError;
use crate::state::Position;
use crate::templates::EntityTemplate;

/// A positioned game object composed from a template's capabilities.
///
/// Entities know nothing about the map that holds them; behaviors that need
/// the surroundings receive the map or a turn context explicitly.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    name: String,
    glyph: Glyph,
    position: Position,
    capabilities: CapabilitySet,
}

impl Entity {
    /// Builds an entity at the origin, running each capability's `init`.
    pub fn new(template: &EntityTemplate) -> Result<Self, TemplateError> {
        Ok(Self {
            name: template.name.clone(),
            glyph: template.glyph(),
            position: Position::ORIGIN,
            capabilities: CapabilitySet::from_template(template)?,
        })
    }

    /// Places the entity at `position`.
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn glyph(&self) -> &Glyph {
        &self.glyph
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn x(&self) -> i32 {
        self.position.x
    }

    pub fn y(&self) -> i32 {
        self.position.y
    }

    /// Moves the entity without consulting any map. Entities already on a
    /// map go through [`Map::move_entity`](super::Map::move_entity), which
    /// rejects positions outside the map's bounds.
    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn has_capability(&self, kind: CapabilityKind) -> bool {
        self.capabilities.has(kind)
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    pub fn capability<T: CapabilityState>(&self) -> Option<&T> {
        self.capabilities.get::<T>()
    }

    pub fn capability_mut<T: CapabilityState>(&mut self) -> Option<&mut T> {
        self.capabilities.get_mut::<T>()
    }

    pub fn responds_to(&self, behavior: Behavior) -> bool {
        self.capabilities.provider(behavior).is_some()
    }

    /// The capability answering `behavior`.
    ///
    /// # Panics
    ///
    /// When no attached capability provides `behavior`. Asking an entity for
    /// a behavior it lacks is a programming error.
    pub fn dispatch(&self, behavior: Behavior) -> &Capability {
        match self.capabilities.provider(behavior) {
            Some(capability) => capability,
            None => missing_behavior(&self.name, behavior),
        }
    }

    pub fn dispatch_mut(&mut self, behavior: Behavior) -> &mut Capability {
        match self.capabilities.provider_mut(behavior) {
            Some(capability) => capability,
            None => missing_behavior(&self.name, behavior),
        }
    }

    /// Typed state of the capability answering `behavior`.
    ///
    /// # Panics
    ///
    /// As [`dispatch`](Self::dispatch), or when `behavior` is answered by a
    /// capability other than `T`.
    pub fn require<T: CapabilityState>(&self, behavior: Behavior) -> &T {
        let capability = self.dispatch(behavior);
        match T::from_capability(capability) {
            Some(state) => state,
            None => wrong_provider(&self.name, behavior, T::KIND, capability.kind()),
        }
    }

    pub fn require_mut<T: CapabilityState>(&mut self, behavior: Behavior) -> &mut T {
        let capability = self.capabilities.provider_mut(behavior);
        let Some(capability) = capability else {
            missing_behavior(&self.name, behavior)
        };
        let actual = capability.kind();
        match T::from_capability_mut(capability) {
            Some(state) => state,
            None => wrong_provider(&self.name, behavior, T::KIND, actual),
        }
    }

    pub fn hp(&self) -> Option<i32> {
        self.capability::<Destructible>().map(Destructible::hp)
    }

    pub fn max_hp(&self) -> Option<i32> {
        self.capability::<Destructible>().map(Destructible::max_hp)
    }

    pub fn attack_value(&self) -> Option<i32> {
        self.capability::<Attacker>().map(Attacker::attack_value)
    }

    pub fn defense_value(&self) -> Option<i32> {
        self.capability::<Destructible>()
            .map(Destructible::defense_value)
    }
}

#[cold]
fn missing_behavior(name: &str, behavior: Behavior) -> ! {
    panic!("entity '{name}' has no capability providing {behavior}")
}

#[cold]
fn wrong_provider(
    name: &str,
    behavior: Behavior,
    expected: CapabilityKind,
    actual: CapabilityKind,
) -> ! {
    panic!("entity '{name}': {behavior} is provided by {actual}, not {expected}")
}
