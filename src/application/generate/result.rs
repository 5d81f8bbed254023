//! Generate Result

use std::path::PathBuf;

/// Outcome of one generation unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitReport {
    pub unit: String,
    /// Files handed to an existing-target strategy for writing
    pub written: Vec<PathBuf>,
    /// Model nodes declined by a skip decider or strategy
    pub skipped_nodes: usize,
    /// Sources left alone because they did not change
    pub skipped_sources: usize,
}

impl UnitReport {
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            ..Self::default()
        }
    }
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub units: Vec<UnitReport>,
}

impl GenerationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn written_count(&self) -> usize {
        self.units.iter().map(|u| u.written.len()).sum()
    }

    pub fn skipped_count(&self) -> usize {
        self.units
            .iter()
            .map(|u| u.skipped_nodes + u.skipped_sources)
            .sum()
    }

    pub fn written(&self) -> impl Iterator<Item = &PathBuf> {
        self.units.iter().flat_map(|u| u.written.iter())
    }

    pub fn has_changes(&self) -> bool {
        self.written_count() > 0
    }
}
