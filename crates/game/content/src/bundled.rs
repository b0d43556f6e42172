//! Content compiled into the binary, for running without a data directory.

use grotto_core::{GameConfig, Map};

use crate::catalog::TemplateCatalog;
use crate::loaders::{ConfigLoader, LoadResult, MapLoader, TemplateLoader};

pub const CONFIG: &str = include_str!("../data/config.toml");
pub const TEMPLATES: &str = include_str!("../data/templates.ron");
pub const CAVERN: &str = include_str!("../data/maps/cavern.ron");

pub fn config() -> LoadResult<GameConfig> {
    ConfigLoader::parse(CONFIG)
}

pub fn templates() -> LoadResult<TemplateCatalog> {
    TemplateLoader::parse(TEMPLATES)
}

pub fn cavern() -> LoadResult<Map> {
    MapLoader::parse(CAVERN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_content_parses() {
        assert_eq!(config().unwrap(), GameConfig::default());
        let catalog = templates().unwrap();
        let builtin = TemplateCatalog::builtin();
        assert!(catalog.ids().eq(builtin.ids()));
        assert_eq!(catalog.get("player"), builtin.get("player"));
        assert_eq!(catalog.require("fungus").unwrap().growths, Some(5));
        let map = cavern().unwrap();
        assert_eq!((map.width(), map.height()), (40, 16));
    }
}
