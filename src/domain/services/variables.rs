//! Variable store
//!
//! Variables are set by outlets while a file is generated and are the only
//! state shared across nested mergepoint calls. Each binding carries a
//! scope; `end_file` and `end_generation` purge expired bindings.

use super::scoped_store::ScopedStore;
use crate::domain::value_objects::{QualifiedName, VariableScope};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub value: String,
    pub scope: VariableScope,
}

#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    store: ScopedStore<Variable>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable; a binding at the same name is replaced together with its scope.
    pub fn set(&mut self, name: QualifiedName, value: impl Into<String>, scope: VariableScope) {
        self.store.set(
            name,
            Variable {
                value: value.into(),
                scope,
            },
        );
    }

    pub fn get_in_hierarchy(&self, name: &QualifiedName) -> Option<&Variable> {
        self.store.get_in_hierarchy(name)
    }

    pub fn value_in_hierarchy(&self, name: &QualifiedName) -> Option<&str> {
        self.get_in_hierarchy(name).map(|v| v.value.as_str())
    }

    pub fn remove(&mut self, name: &QualifiedName) -> Option<Variable> {
        self.store.remove(name)
    }

    /// Drop file-scoped bindings
    pub fn end_file(&mut self) {
        self.store.retain(|v| v.scope != VariableScope::File);
    }

    /// Drop file- and generation-scoped bindings
    pub fn end_generation(&mut self) {
        self.store.retain(|v| v.scope == VariableScope::Run);
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
