//! Scoped store
//!
//! Maps qualified names to values and answers "in hierarchy" queries: the
//! binding for a name in the most specific namespace that is an ancestor of
//! (or equal to) the lookup namespace.
//!
//! Bindings are grouped by local name and then by namespace, so a hierarchy
//! lookup costs one map probe per namespace level instead of a scan.

use std::collections::{BTreeMap, HashMap};

use crate::domain::value_objects::{Namespace, QualifiedName};

#[derive(Debug, Clone)]
pub struct ScopedStore<T> {
    by_name: HashMap<String, BTreeMap<Namespace, T>>,
}

impl<T> Default for ScopedStore<T> {
    fn default() -> Self {
        Self {
            by_name: HashMap::new(),
        }
    }
}

impl<T> ScopedStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` at exactly `name`, returning the superseded value.
    pub fn set(&mut self, name: QualifiedName, value: T) -> Option<T> {
        self.by_name
            .entry(name.name().to_string())
            .or_default()
            .insert(name.namespace().clone(), value)
    }

    /// Exact lookup, no hierarchy walk
    pub fn get(&self, name: &QualifiedName) -> Option<&T> {
        self.by_name.get(name.name())?.get(name.namespace())
    }

    pub fn get_mut(&mut self, name: &QualifiedName) -> Option<&mut T> {
        self.by_name.get_mut(name.name())?.get_mut(name.namespace())
    }

    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &QualifiedName) -> Option<T> {
        let layers = self.by_name.get_mut(name.name())?;
        let removed = layers.remove(name.namespace());
        if layers.is_empty() {
            self.by_name.remove(name.name());
        }
        removed
    }

    /// Most specific existing key visible from `lookup`.
    pub fn key_in_hierarchy(&self, lookup: &QualifiedName) -> Option<QualifiedName> {
        let layers = self.by_name.get(lookup.name())?;
        lookup
            .namespace()
            .ancestors_or_self()
            .find(|namespace| layers.contains_key(namespace))
            .map(|namespace| lookup.with_namespace(namespace))
    }

    /// Value of the most specific binding visible from `lookup`.
    pub fn get_in_hierarchy(&self, lookup: &QualifiedName) -> Option<&T> {
        let layers = self.by_name.get(lookup.name())?;
        lookup
            .namespace()
            .ancestors_or_self()
            .find_map(|namespace| layers.get(&namespace))
    }

    /// Every binding of `lookup`'s name visible from its namespace, most
    /// specific first (hidden layers included).
    pub fn get_all_in_hierarchy(&self, lookup: &QualifiedName) -> Vec<(QualifiedName, &T)> {
        let Some(layers) = self.by_name.get(lookup.name()) else {
            return Vec::new();
        };
        lookup
            .namespace()
            .ancestors_or_self()
            .filter_map(|namespace| {
                layers
                    .get(&namespace)
                    .map(|value| (lookup.with_namespace(namespace), value))
            })
            .collect()
    }

    /// Closest-wins view: for every name, the most specific binding visible
    /// from `namespace`.
    pub fn visible(&self, namespace: &Namespace) -> BTreeMap<String, (QualifiedName, &T)> {
        self.by_name
            .iter()
            .filter_map(|(name, layers)| {
                layers
                    .iter()
                    .filter(|(ns, _)| ns.is_ancestor_or_self_of(namespace))
                    .max_by_key(|(ns, _)| ns.depth())
                    .and_then(|(ns, value)| {
                        QualifiedName::new(ns.clone(), name)
                            .ok()
                            .map(|qn| (name.clone(), (qn, value)))
                    })
            })
            .collect()
    }

    /// All-layers view: every binding whose namespace is an ancestor of (or
    /// equal to) `namespace`, including ones hidden by more specific
    /// bindings. Sorted by name, then most specific first.
    pub fn all_visible(&self, namespace: &Namespace) -> Vec<(QualifiedName, &T)> {
        let mut names: Vec<&String> = self.by_name.keys().collect();
        names.sort();
        names
            .into_iter()
            .flat_map(|name| {
                let layers = &self.by_name[name];
                namespace.ancestors_or_self().filter_map(move |ns| {
                    let value = layers.get(&ns)?;
                    QualifiedName::new(ns, name).ok().map(|qn| (qn, value))
                })
            })
            .collect()
    }

    /// Keep only bindings for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        for layers in self.by_name.values_mut() {
            layers.retain(|_, value| keep(value));
        }
        self.by_name.retain(|_, layers| !layers.is_empty());
    }

    pub fn iter(&self) -> impl Iterator<Item = (QualifiedName, &T)> {
        self.by_name.iter().flat_map(|(name, layers)| {
            layers.iter().filter_map(move |(ns, value)| {
                QualifiedName::new(ns.clone(), name)
                    .ok()
                    .map(|qn| (qn, value))
            })
        })
    }

    pub fn len(&self) -> usize {
        self.by_name.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_name.clear();
    }
}
