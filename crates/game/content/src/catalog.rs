//! Named entity templates.

use std::collections::BTreeMap;

use anyhow::Context;
use grotto_core::{Entity, EntityTemplate};

use crate::loaders::LoadResult;

/// Validated templates keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TemplateCatalog {
    templates: BTreeMap<String, EntityTemplate>,
}

impl TemplateCatalog {
    pub const PLAYER: &'static str = "player";
    pub const FUNGUS: &'static str = "fungus";

    /// The two templates the game ships with.
    pub fn builtin() -> Self {
        let mut templates = BTreeMap::new();
        templates.insert(Self::PLAYER.to_owned(), EntityTemplate::player());
        templates.insert(Self::FUNGUS.to_owned(), EntityTemplate::fungus());
        Self { templates }
    }

    /// Adds `template` under `id` after checking it builds a valid entity.
    pub fn insert(&mut self, id: impl Into<String>, template: EntityTemplate) -> LoadResult<()> {
        let id = id.into();
        Entity::new(&template).with_context(|| format!("invalid template '{id}'"))?;
        if self.templates.contains_key(&id) {
            anyhow::bail!("duplicate template id '{id}'");
        }
        self.templates.insert(id, template);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&EntityTemplate> {
        self.templates.get(id)
    }

    /// Like [`get`](Self::get), but a missing id is an error.
    pub fn require(&self, id: &str) -> LoadResult<&EntityTemplate> {
        self.get(id)
            .with_context(|| format!("template '{id}' is not in the catalog"))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_player_and_fungus() {
        let catalog = TemplateCatalog::builtin();
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["fungus", "player"]);
        assert_eq!(catalog.require("player").unwrap().max_hp, Some(40));
        assert!(catalog.require("dragon").is_err());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut catalog = TemplateCatalog::builtin();
        assert!(catalog.insert("fungus", EntityTemplate::fungus()).is_err());
        assert_eq!(catalog.len(), 2);
    }
}
