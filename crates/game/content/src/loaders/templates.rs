//! Entity template catalog loader.

use std::path::Path;

use grotto_core::EntityTemplate;

use crate::catalog::TemplateCatalog;
use crate::loaders::{LoadResult, read_file};

/// Loader for entity templates from RON files.
pub struct TemplateLoader;

impl TemplateLoader {
    /// Load a template catalog from a RON file.
    ///
    /// RON format: `Vec<(String, EntityTemplate)>`. Every template is checked
    /// by constructing a throwaway entity, so a bad capability list fails here
    /// instead of at spawn time.
    pub fn load(path: &Path) -> LoadResult<TemplateCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<TemplateCatalog> {
        let raw_data: Vec<(String, EntityTemplate)> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse template catalog RON: {}", e))?;

        let mut catalog = TemplateCatalog::default();
        for (template_id, template) in raw_data {
            catalog.insert(template_id, template)?;
        }

        tracing::debug!(templates = catalog.len(), "loaded template catalog");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use grotto_core::CapabilityKind;

    use super::*;

    #[test]
    fn catalog_entries_keep_their_capability_order() {
        let catalog = TemplateLoader::parse(
            r#"[
                ("slime", (
                    name: "slime",
                    character: 's',
                    foreground: "lime",
                    max_hp: Some(3),
                    capabilities: [FungusActor, Destructible],
                )),
            ]"#,
        )
        .unwrap();

        let slime = catalog.get("slime").unwrap();
        assert_eq!(slime.character, 's');
        assert_eq!(slime.background, "black");
        assert_eq!(
            slime.capabilities,
            vec![CapabilityKind::FungusActor, CapabilityKind::Destructible]
        );
    }

    #[test]
    fn conflicting_actors_are_reported_with_the_template_name() {
        let error = TemplateLoader::parse(
            r#"[("hydra", (name: "hydra", capabilities: [PlayerActor, FungusActor]))]"#,
        )
        .unwrap_err();

        let message = format!("{error:#}");
        assert!(message.contains("hydra"), "{message}");
        assert!(message.contains("Actor"), "{message}");
    }

    #[test]
    fn unknown_capabilities_fail_to_parse() {
        assert!(TemplateLoader::parse(r#"[("x", (capabilities: [Teleporter]))]"#).is_err());
    }
}
