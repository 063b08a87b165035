//! Per-container template store.
//!
//! A store is populated once per container: bundled built-ins first, then the
//! container's custom templates. Lookups are by kind and name. `register`
//! replaces an existing entry of the same name and hands it back so callers
//! can decide how to treat a collision.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::embedded::EmbeddedTemplateRepository;
use super::{Template, TemplateKind};
use crate::core::error::Result;

/// Named templates grouped by kind
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    templates: HashMap<TemplateKind, HashMap<String, Arc<Template>>>,
}

impl TemplateStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the bundled built-ins for `namespace`
    pub fn with_builtins(namespace: &str) -> Result<Self> {
        let mut store = Self::new();
        for template in EmbeddedTemplateRepository::new().load_builtins(namespace)? {
            store.register(template);
        }
        debug!(
            namespace = namespace,
            template_count = store.len(),
            "Loaded built-in templates"
        );
        Ok(store)
    }

    /// Add a template under its own kind and name, returning the entry it replaced
    pub fn register(&mut self, template: Template) -> Option<Arc<Template>> {
        self.templates
            .entry(template.kind())
            .or_default()
            .insert(template.name().to_string(), Arc::new(template))
    }

    /// Find a template by kind and name
    pub fn lookup(&self, kind: TemplateKind, name: &str) -> Option<&Arc<Template>> {
        self.templates.get(&kind).and_then(|by_name| by_name.get(name))
    }

    pub fn contains(&self, kind: TemplateKind, name: &str) -> bool {
        self.lookup(kind, name).is_some()
    }

    /// Names registered for a kind, sorted
    pub fn names(&self, kind: TemplateKind) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .templates
            .get(&kind)
            .map(|by_name| by_name.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.templates.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::templates::TemplateOrigin;
    use std::path::PathBuf;

    fn user_template(kind: TemplateKind, name: &str, body: &str) -> Template {
        Template::new(
            name,
            kind,
            body,
            "examplemod",
            TemplateOrigin::File(PathBuf::from(format!("{name}.json"))),
        )
    }

    #[test]
    fn test_register_and_lookup() {
        let mut store = TemplateStore::new();
        assert!(store.is_empty());

        let previous = store.register(user_template(TemplateKind::Block, "pillar", "{}"));
        assert!(previous.is_none());

        assert!(store.contains(TemplateKind::Block, "pillar"));
        // Same name, different kind
        assert!(!store.contains(TemplateKind::Item, "pillar"));
        assert!(store.lookup(TemplateKind::Block, "missing").is_none());
    }

    #[test]
    fn test_register_returns_replaced_entry() {
        let mut store = TemplateStore::new();
        store.register(user_template(TemplateKind::Item, "basic", "first"));
        let previous = store
            .register(user_template(TemplateKind::Item, "basic", "second"))
            .unwrap();

        assert_eq!(previous.body(), "first");
        assert_eq!(
            store.lookup(TemplateKind::Item, "basic").unwrap().body(),
            "second"
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_with_builtins() {
        let store = TemplateStore::with_builtins("examplemod").unwrap();

        assert_eq!(store.names(TemplateKind::Item), vec!["basic", "block"]);
        assert_eq!(store.names(TemplateKind::Block), vec!["basic"]);
        assert_eq!(store.names(TemplateKind::BlockState), vec!["basic"]);
        assert_eq!(
            store.names(TemplateKind::Loot),
            vec!["drop_other", "drop_self", "drop_self_silk"]
        );

        let block = store.lookup(TemplateKind::Block, "basic").unwrap();
        assert!(block.is_builtin());
        assert!(block.body().contains("examplemod:block/${id}"));
    }
}
