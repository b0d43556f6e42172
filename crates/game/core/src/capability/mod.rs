//! Capability registry: the composable behaviors attached to entities.
//!
//! The set of capabilities is closed. Each [`Capability`] variant carries the
//! private per-entity state of that capability, seeded once from the entity's
//! [`EntityTemplate`] at construction. A [`CapabilitySet`] keeps the attached
//! capabilities in template order and a dispatch table mapping every
//! [`Behavior`] to the capability implementing it.
//!
//! Behaviors that touch more than the receiving entity (movement, combat,
//! messaging, turns) are free functions taking the map or a
//! [`TurnContext`](crate::engine::TurnContext) explicitly, with the receiving
//! entity passed by id.

mod actor;
mod attacker;
mod destructible;
mod messaging;
mod moveable;

pub use actor::{FungusActor, PlayerActor, act};
pub use attacker::{Attacker, attack, roll_damage};
pub use destructible::{Destructible, take_damage};
pub use messaging::{MessageRecipient, send_message, send_message_nearby};
pub use moveable::{Moveable, try_move};

use strum::EnumCount;

use crate::error::TemplateError;
use crate::templates::EntityTemplate;

/// Names of the attachable capabilities.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum CapabilityKind {
    Moveable,
    PlayerActor,
    FungusActor,
    Attacker,
    Destructible,
    MessageRecipient,
}

impl CapabilityKind {
    /// Exclusivity group, if any. An entity carries at most one capability per group.
    pub const fn group(self) -> Option<CapabilityGroup> {
        match self {
            CapabilityKind::PlayerActor | CapabilityKind::FungusActor => {
                Some(CapabilityGroup::Actor)
            }
            CapabilityKind::Attacker => Some(CapabilityGroup::Attacker),
            CapabilityKind::Moveable
            | CapabilityKind::Destructible
            | CapabilityKind::MessageRecipient => None,
        }
    }

    /// Behaviors this capability answers.
    pub const fn behaviors(self) -> &'static [Behavior] {
        match self {
            CapabilityKind::Moveable => &[Behavior::TryMove],
            CapabilityKind::PlayerActor | CapabilityKind::FungusActor => &[Behavior::Act],
            CapabilityKind::Attacker => &[Behavior::Attack, Behavior::AttackValue],
            CapabilityKind::Destructible => &[
                Behavior::TakeDamage,
                Behavior::Hp,
                Behavior::MaxHp,
                Behavior::DefenseValue,
            ],
            CapabilityKind::MessageRecipient => &[
                Behavior::ReceiveMessage,
                Behavior::Messages,
                Behavior::ClearMessages,
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CapabilityGroup {
    Actor,
    Attacker,
}

/// Named behaviors an entity can be asked to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumCount)]
#[strum(serialize_all = "camelCase")]
pub enum Behavior {
    TryMove,
    Act,
    Attack,
    AttackValue,
    TakeDamage,
    Hp,
    MaxHp,
    DefenseValue,
    ReceiveMessage,
    Messages,
    ClearMessages,
}

/// An attached capability together with its per-entity state.
#[derive(Clone, Debug, PartialEq)]
pub enum Capability {
    Moveable(Moveable),
    PlayerActor(PlayerActor),
    FungusActor(FungusActor),
    Attacker(Attacker),
    Destructible(Destructible),
    MessageRecipient(MessageRecipient),
}

impl Capability {
    /// Runs the capability's `init` against the construction template.
    pub fn init(kind: CapabilityKind, template: &EntityTemplate) -> Result<Self, TemplateError> {
        Ok(match kind {
            CapabilityKind::Moveable => Capability::Moveable(Moveable),
            CapabilityKind::PlayerActor => Capability::PlayerActor(PlayerActor),
            CapabilityKind::FungusActor => Capability::FungusActor(FungusActor::init(template)),
            CapabilityKind::Attacker => Capability::Attacker(Attacker::init(template)?),
            CapabilityKind::Destructible => {
                Capability::Destructible(Destructible::init(template)?)
            }
            CapabilityKind::MessageRecipient => {
                Capability::MessageRecipient(MessageRecipient::default())
            }
        })
    }

    pub fn kind(&self) -> CapabilityKind {
        match self {
            Capability::Moveable(_) => CapabilityKind::Moveable,
            Capability::PlayerActor(_) => CapabilityKind::PlayerActor,
            Capability::FungusActor(_) => CapabilityKind::FungusActor,
            Capability::Attacker(_) => CapabilityKind::Attacker,
            Capability::Destructible(_) => CapabilityKind::Destructible,
            Capability::MessageRecipient(_) => CapabilityKind::MessageRecipient,
        }
    }
}

/// Typed access to one capability's state inside a [`Capability`].
pub trait CapabilityState: Sized {
    const KIND: CapabilityKind;

    fn from_capability(capability: &Capability) -> Option<&Self>;

    fn from_capability_mut(capability: &mut Capability) -> Option<&mut Self>;
}

macro_rules! capability_state {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl CapabilityState for $variant {
                const KIND: CapabilityKind = CapabilityKind::$variant;

                fn from_capability(capability: &Capability) -> Option<&Self> {
                    match capability {
                        Capability::$variant(state) => Some(state),
                        _ => None,
                    }
                }

                fn from_capability_mut(capability: &mut Capability) -> Option<&mut Self> {
                    match capability {
                        Capability::$variant(state) => Some(state),
                        _ => None,
                    }
                }
            }
        )+
    };
}

capability_state!(
    Moveable,
    PlayerActor,
    FungusActor,
    Attacker,
    Destructible,
    MessageRecipient,
);

/// Ordered capabilities of one entity plus its behavior dispatch table.
#[derive(Clone, Debug, PartialEq)]
pub struct CapabilitySet {
    slots: Vec<Capability>,
    dispatch: [Option<u8>; Behavior::COUNT],
}

impl CapabilitySet {
    /// Validates exclusivity, then initialises each capability in template order.
    pub fn from_template(template: &EntityTemplate) -> Result<Self, TemplateError> {
        let kinds = &template.capabilities;

        for (index, &kind) in kinds.iter().enumerate() {
            for &earlier in &kinds[..index] {
                if earlier == kind {
                    return Err(TemplateError::DuplicateCapability(kind));
                }
                if let Some(group) = kind.group() {
                    if earlier.group() == Some(group) {
                        return Err(TemplateError::DuplicateGroup {
                            group,
                            first: earlier,
                            second: kind,
                        });
                    }
                }
            }
        }

        let mut slots = Vec::with_capacity(kinds.len());
        let mut dispatch = [None; Behavior::COUNT];
        for &kind in kinds {
            let slot = slots.len() as u8;
            slots.push(Capability::init(kind, template)?);
            for &behavior in kind.behaviors() {
                dispatch[behavior as usize] = Some(slot);
            }
        }

        Ok(Self { slots, dispatch })
    }

    pub fn has(&self, kind: CapabilityKind) -> bool {
        self.slots.iter().any(|slot| slot.kind() == kind)
    }

    /// Attached capability kinds in attachment order.
    pub fn kinds(&self) -> impl Iterator<Item = CapabilityKind> + '_ {
        self.slots.iter().map(Capability::kind)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The capability answering `behavior`, if any.
    pub fn provider(&self, behavior: Behavior) -> Option<&Capability> {
        let slot = self.dispatch[behavior as usize]?;
        self.slots.get(slot as usize)
    }

    pub fn provider_mut(&mut self, behavior: Behavior) -> Option<&mut Capability> {
        let slot = self.dispatch[behavior as usize]?;
        self.slots.get_mut(slot as usize)
    }

    pub fn get<T: CapabilityState>(&self) -> Option<&T> {
        self.slots.iter().find_map(T::from_capability)
    }

    pub fn get_mut<T: CapabilityState>(&mut self) -> Option<&mut T> {
        self.slots.iter_mut().find_map(T::from_capability_mut)
    }
}
