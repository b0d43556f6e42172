//! Content factory for loading a whole data directory.

use std::path::{Path, PathBuf};

use grotto_core::{GameConfig, Map};

use crate::catalog::TemplateCatalog;
use crate::loaders::{ConfigLoader, LoadResult, MapLoader, TemplateLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── templates.ron
/// └── maps/
///     └── cavern.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The data directory shipped inside this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the template catalog from `templates.ron`.
    pub fn load_templates(&self) -> LoadResult<TemplateCatalog> {
        TemplateLoader::load(&self.data_dir.join("templates.ron"))
    }

    /// Load `maps/<name>.ron`.
    pub fn load_map(&self, name: &str) -> LoadResult<Map> {
        let path = self.data_dir.join("maps").join(format!("{name}.ron"));
        MapLoader::load(&path)
    }
}
