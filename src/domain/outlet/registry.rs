//! Outlet registry
//!
//! Holds every outlet of a generation unit by qualified name together with
//! its mergepoint chains. Mapping mistakes surface here, at configuration
//! time, instead of during generation.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{MergepointMapping, Outlet, OutletRef};
use crate::domain::services::ScopedStore;
use crate::domain::value_objects::QualifiedName;
use crate::error::{ConfigurationError, GenerationError};

/// A registered outlet and the resolved chain of each of its mergepoints
#[derive(Debug, Clone)]
pub struct OutletEntry {
    outlet: Arc<dyn Outlet>,
    chains: BTreeMap<String, Vec<OutletRef>>,
}

impl OutletEntry {
    pub fn outlet(&self) -> &Arc<dyn Outlet> {
        &self.outlet
    }

    /// Outlets run for `mergepoint`, in order. Unmapped mergepoints are empty.
    pub fn mergepoint_chain(&self, mergepoint: &str) -> &[OutletRef] {
        self.chains.get(mergepoint).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn mergepoints(&self) -> impl Iterator<Item = &str> {
        self.chains.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default)]
pub struct OutletRegistry {
    outlets: ScopedStore<OutletEntry>,
}

impl OutletRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, outlet: Arc<dyn Outlet>) -> Result<(), ConfigurationError> {
        let name = outlet.name().clone();
        if self.outlets.contains(&name) {
            return Err(ConfigurationError::DuplicateOutlet {
                name: name.to_string(),
            });
        }
        self.outlets.set(
            name,
            OutletEntry {
                outlet,
                chains: BTreeMap::new(),
            },
        );
        Ok(())
    }

    /// Applies a mapping to the chain of `mergepoint` on the outlet
    /// registered exactly at `outlet`.
    pub fn add_mapping(
        &mut self,
        outlet: &QualifiedName,
        mergepoint: &str,
        mapping: &MergepointMapping,
    ) -> Result<(), ConfigurationError> {
        let entry =
            self.outlets
                .get_mut(outlet)
                .ok_or_else(|| ConfigurationError::UnknownOutlet {
                    name: outlet.to_string(),
                    referenced_by: format!("mapping of mergepoint '{}'", mergepoint),
                })?;
        if !entry.outlet.accepts_mergepoints() {
            return Err(ConfigurationError::MergepointsNotSupported {
                outlet: outlet.to_string(),
                mergepoint: mergepoint.to_string(),
            });
        }
        mapping.apply(entry.chains.entry(mergepoint.to_string()).or_default());
        Ok(())
    }

    /// Outlet for `reference`, looked up from the reference's namespace
    /// towards the root.
    pub fn resolve(&self, reference: &OutletRef) -> Result<&Arc<dyn Outlet>, GenerationError> {
        self.outlets
            .get_in_hierarchy(&reference.name)
            .map(OutletEntry::outlet)
            .ok_or_else(|| GenerationError::OutletNotFound {
                name: reference.name.to_string(),
            })
    }

    pub fn entry(&self, name: &QualifiedName) -> Option<&OutletEntry> {
        self.outlets.get(name)
    }

    pub fn contains_in_hierarchy(&self, name: &QualifiedName) -> bool {
        self.outlets.get_in_hierarchy(name).is_some()
    }

    pub fn mergepoint_chain(&self, outlet: &QualifiedName, mergepoint: &str) -> &[OutletRef] {
        self.outlets
            .get(outlet)
            .map(|entry| entry.mergepoint_chain(mergepoint))
            .unwrap_or(&[])
    }

    /// Checks every outlet named in a mergepoint chain can be resolved.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let mut entries: Vec<_> = self.outlets.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (name, entry) in entries {
            for (mergepoint, chain) in &entry.chains {
                if let Some(missing) = chain.iter().find(|r| !self.contains_in_hierarchy(&r.name)) {
                    return Err(ConfigurationError::UnknownOutlet {
                        name: missing.name.to_string(),
                        referenced_by: format!("mergepoint '{}' of outlet '{}'", mergepoint, name),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.outlets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outlets.is_empty()
    }
}
