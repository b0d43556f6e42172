/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Chebyshev radius reached by nearby broadcasts such as fungus growth.
    pub message_radius: u32,
    /// Per-turn probability that a fungus with growths left tries to spread.
    pub fungus_spread_chance: f64,
    /// Consecutive scheduler slots allowed without any player turn before
    /// [`Engine::run`](crate::engine::Engine::run) yields.
    pub max_steps_without_input: u32,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MESSAGE_RADIUS: u32 = 5;
    pub const DEFAULT_FUNGUS_SPREAD_CHANCE: f64 = 0.02;
    pub const DEFAULT_MAX_STEPS_WITHOUT_INPUT: u32 = 10_000;

    pub fn new() -> Self {
        Self {
            message_radius: Self::DEFAULT_MESSAGE_RADIUS,
            fungus_spread_chance: Self::DEFAULT_FUNGUS_SPREAD_CHANCE,
            max_steps_without_input: Self::DEFAULT_MAX_STEPS_WITHOUT_INPUT,
        }
    }

    pub fn with_message_radius(mut self, message_radius: u32) -> Self {
        self.message_radius = message_radius;
        self
    }

    pub fn with_fungus_spread_chance(mut self, chance: f64) -> Self {
        self.fungus_spread_chance = chance;
        self
    }

    pub fn with_max_steps_without_input(mut self, steps: u32) -> Self {
        self.max_steps_without_input = steps;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
