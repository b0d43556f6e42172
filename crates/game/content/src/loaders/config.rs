//! Game configuration loader.

use std::path::Path;

use grotto_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if !(0.0..=1.0).contains(&config.fungus_spread_chance) {
            anyhow::bail!(
                "fungus_spread_chance must lie in [0, 1], got {}",
                config.fungus_spread_chance
            );
        }

        tracing::debug!(?config, "loaded game config");
        Ok(config)
    }
}
