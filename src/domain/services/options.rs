//! Options - unit-wide configuration values addressed by qualified name
//!
//! Options live for the whole run; re-declaring one supersedes it.

use std::collections::BTreeMap;

use super::scoped_store::ScopedStore;
use crate::domain::value_objects::{InvalidNameError, Namespace, QualifiedName};

#[derive(Debug, Clone, Default)]
pub struct Options {
    store: ScopedStore<String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: QualifiedName, value: impl Into<String>) {
        self.store.set(name, value.into());
    }

    /// Closest visible value for `name`
    pub fn get_in_hierarchy(&self, name: &QualifiedName) -> Option<&str> {
        self.store.get_in_hierarchy(name).map(String::as_str)
    }

    /// Resolve `key` against `default_namespace`, then look it up in hierarchy.
    pub fn lookup(
        &self,
        key: &str,
        default_namespace: &Namespace,
    ) -> Result<Option<&str>, InvalidNameError> {
        let name = QualifiedName::resolve(key, default_namespace)?;
        Ok(self.get_in_hierarchy(&name))
    }

    /// Closest-wins view of every option visible from `namespace`
    pub fn visible(&self, namespace: &Namespace) -> BTreeMap<String, &str> {
        self.store
            .visible(namespace)
            .into_iter()
            .map(|(name, (_, value))| (name, value.as_str()))
            .collect()
    }

    /// Every layer visible from `namespace`, hidden bindings included
    pub fn all_visible(&self, namespace: &Namespace) -> Vec<(QualifiedName, &str)> {
        self.store
            .all_visible(namespace)
            .into_iter()
            .map(|(name, value)| (name, value.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
