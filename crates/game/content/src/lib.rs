//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML data files:
//! - Entity templates (data-driven via RON)
//! - Map layouts (data-driven via RON)
//! - Game configuration (data-driven via TOML)
//!
//! [`ScenarioBuilder`] turns a loaded map and templates into a populated
//! starting world.

pub mod bundled;
pub mod catalog;
pub mod loaders;
pub mod scenario;

pub use catalog::TemplateCatalog;
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, MapLoader, TemplateLoader};
pub use scenario::{Scenario, ScenarioBuilder};
