//! Named monster templates.

use std::collections::BTreeMap;
use std::sync::Arc;

use game_core::MonsterTemplate;

/// Monster templates keyed by name.
///
/// Templates are shared: every monster spawned from the same entry holds the
/// same `Arc`.
#[derive(Clone, Debug, Default)]
pub struct MonsterCatalog {
    templates: BTreeMap<String, Arc<MonsterTemplate>>,
}

impl MonsterCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a template, returning the one it replaced under the same name.
    pub fn insert(&mut self, template: MonsterTemplate) -> Option<Arc<MonsterTemplate>> {
        self.templates
            .insert(template.name.clone(), Arc::new(template))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<MonsterTemplate>> {
        self.templates.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Template names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl FromIterator<MonsterTemplate> for MonsterCatalog {
    fn from_iter<I: IntoIterator<Item = MonsterTemplate>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for template in iter {
            catalog.insert(template);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use game_core::BehaviorSpec;

    use super::*;

    #[test]
    fn later_templates_replace_earlier_ones() {
        let mut catalog = MonsterCatalog::new();
        assert!(catalog.insert(MonsterTemplate::new("keese", 1, BehaviorSpec::Idle)).is_none());
        let replaced = catalog.insert(MonsterTemplate::new("keese", 2, BehaviorSpec::Idle));
        assert_eq!(replaced.map(|template| template.health), Some(1));
        assert_eq!(catalog.get("keese").map(|template| template.health), Some(2));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn names_are_sorted() {
        let catalog: MonsterCatalog = ["zol", "biri", "keese"]
            .into_iter()
            .map(|name| MonsterTemplate::new(name, 1, BehaviorSpec::Idle))
            .collect();
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["biri", "keese", "zol"]);
    }
}
