//! Monster template loader.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use game_core::{EntityId, Monster, MonsterTemplate};

use crate::catalog::MonsterCatalog;
use crate::loaders::{LoadResult, read_file};

/// Loader for monster templates from RON files.
///
/// The file holds a list of templates. Each one is checked the same way the
/// engine checks it when spawning, so a broken reaction table fails here and
/// not in the middle of a room.
pub struct MonsterLoader;

impl MonsterLoader {
    /// Load a monster catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<MonsterCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid monster file {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<MonsterCatalog> {
        let templates: Vec<MonsterTemplate> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse monster RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for template in &templates {
            if !seen.insert(template.name.as_str()) {
                anyhow::bail!("duplicate monster template '{}'", template.name);
            }
            Monster::new(EntityId(0), Arc::new(template.clone()))?;
        }

        Ok(templates.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use game_core::{BehaviorSpec, TemplateError, TemplateFlags};

    use super::*;

    const KEESE: &str = r#"(
        name: "keese",
        health: 1,
        hard_box: (offset: (-4.0, -4.0), size: (8.0, 8.0)),
        soft_box: (offset: (-5.0, -5.0), size: (10.0, 10.0)),
        flags: ("FLYING"),
        movement: (speed: 0.75),
        behavior: Steer((angle_duration: 8)),
    )"#;

    fn list(entries: &[&str]) -> String {
        format!("[{}]", entries.join(",\n"))
    }

    #[test]
    fn parses_templates_with_defaults() {
        let catalog = MonsterLoader::parse(&list(&[KEESE])).unwrap();
        let keese = catalog.get("keese").unwrap();
        assert_eq!(keese.flags, TemplateFlags::FLYING);
        assert_eq!(keese.contact_damage, 0);
        assert_eq!(keese.movement.angle_count, 8);
        assert!(matches!(keese.behavior, BehaviorSpec::Steer(_)));
    }

    #[test]
    fn rejects_duplicate_names() {
        let error = MonsterLoader::parse(&list(&[KEESE, KEESE])).unwrap_err();
        assert!(error.to_string().contains("duplicate"), "{error}");
    }

    #[test]
    fn surfaces_template_errors() {
        let broken = KEESE.replace("health: 1", "health: 0");
        let error = MonsterLoader::parse(&list(&[&broken])).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<TemplateError>(),
            Some(TemplateError::ZeroHealth { .. })
        ));
    }

    #[test]
    fn load_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("monsters.ron");
        std::fs::write(&path, "[ (name: ) ]").unwrap();
        let error = MonsterLoader::load(&path).unwrap_err();
        assert!(error.to_string().contains("monsters.ron"));
    }
}
