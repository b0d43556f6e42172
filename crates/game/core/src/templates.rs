//! Static blueprints for constructing entities.

use crate::capability::CapabilityKind;
use crate::env::Glyph;

/// Construction-time record: display attributes, stat defaults and the
/// ordered list of capabilities to attach.
///
/// Stats are optional; each capability's `init` falls back to its own
/// default when a field is absent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EntityTemplate {
    pub name: String,
    pub character: char,
    pub foreground: String,
    pub background: String,
    pub max_hp: Option<i32>,
    pub hp: Option<i32>,
    pub attack_value: Option<i32>,
    pub defense_value: Option<i32>,
    /// Spawn budget for growing actors.
    pub growths: Option<u32>,
    pub capabilities: Vec<CapabilityKind>,
}

impl EntityTemplate {
    /// The player character.
    pub fn player() -> Self {
        Self {
            name: "player".to_owned(),
            character: '@',
            foreground: "white".to_owned(),
            max_hp: Some(40),
            attack_value: Some(10),
            capabilities: vec![
                CapabilityKind::Moveable,
                CapabilityKind::PlayerActor,
                CapabilityKind::Attacker,
                CapabilityKind::Destructible,
                CapabilityKind::MessageRecipient,
            ],
            ..Self::default()
        }
    }

    /// A stationary fungus that slowly spreads to adjacent floor.
    pub fn fungus() -> Self {
        Self {
            name: "fungus".to_owned(),
            character: 'F',
            foreground: "green".to_owned(),
            max_hp: Some(10),
            capabilities: vec![CapabilityKind::FungusActor, CapabilityKind::Destructible],
            ..Self::default()
        }
    }

    pub fn glyph(&self) -> Glyph {
        Glyph::new(self.character, &*self.foreground, &*self.background)
    }

    pub fn has_capability(&self, kind: CapabilityKind) -> bool {
        self.capabilities.contains(&kind)
    }
}

impl Default for EntityTemplate {
    fn default() -> Self {
        Self {
            name: String::new(),
            character: ' ',
            foreground: Glyph::DEFAULT_FOREGROUND.to_owned(),
            background: Glyph::DEFAULT_BACKGROUND.to_owned(),
            max_hp: None,
            hp: None,
            attack_value: None,
            defense_value: None,
            growths: None,
            capabilities: Vec::new(),
        }
    }
}
