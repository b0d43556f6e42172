//! Map layout loader.
//!
//! Layouts are pure terrain; entity placement is the job of
//! [`ScenarioBuilder`](crate::ScenarioBuilder).

use std::path::Path;

use grotto_core::Map;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Map layout as stored in RON: one string per row, `#` wall, `.` floor,
/// anything else null.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapLayoutRon {
    rows: Vec<String>,
}

/// Loader for map layouts from RON files.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<Map> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Ragged rows are allowed; missing cells read as null tiles.
    pub fn parse(content: &str) -> LoadResult<Map> {
        let layout: MapLayoutRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        if layout.rows.is_empty() {
            anyhow::bail!("Map layout has no rows");
        }

        let map = Map::from_rows(layout.rows.as_slice());
        tracing::debug!(width = map.width(), height = map.height(), "loaded map layout");
        Ok(map)
    }
}
