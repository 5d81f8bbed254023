//! Generation unit configuration

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::output::DEFAULT_OUTPUT_DIR_KEY;
use super::Output;
use crate::domain::outlet::OutletRegistry;
use crate::domain::services::Options;

/// Default name of the persisted checksums file
pub const DEFAULT_CHECKSUMS_FILE: &str = "last-source-changes.checksums";

/// One complete batch: outlets, options and outputs processed together
#[derive(Debug, Clone)]
pub struct UnitConfiguration {
    pub name: String,
    /// Prefix of the source-change keys of this unit
    pub template_set: String,
    /// Relative paths below resolve against this directory
    pub base_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub checksums_file: String,
    pub run_only_on_source_change: bool,
    pub output_dirs: BTreeMap<String, PathBuf>,
    pub options: Options,
    pub outlets: OutletRegistry,
    pub outputs: Vec<Output>,
}

impl UnitConfiguration {
    pub fn new(name: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        let name = name.into();
        Self {
            template_set: name.clone(),
            name,
            base_dir: base_dir.into(),
            cache_dir: PathBuf::from(".weaver"),
            checksums_file: DEFAULT_CHECKSUMS_FILE.to_string(),
            run_only_on_source_change: false,
            output_dirs: BTreeMap::new(),
            options: Options::new(),
            outlets: OutletRegistry::new(),
            outputs: Vec::new(),
        }
    }

    /// Resolve `path` against the base directory unless it is absolute.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }

    pub fn checksums_path(&self) -> PathBuf {
        self.resolve_path(&self.cache_dir).join(&self.checksums_file)
    }

    /// Directory registered under `key`. The default key falls back to the
    /// base directory when not configured.
    pub fn output_dir(&self, key: &str) -> Option<PathBuf> {
        match self.output_dirs.get(key) {
            Some(dir) => Some(self.resolve_path(dir)),
            None if key == DEFAULT_OUTPUT_DIR_KEY => Some(self.base_dir.clone()),
            None => None,
        }
    }

    pub fn target_path(&self, key: &str, filename: &str) -> Option<PathBuf> {
        self.output_dir(key).map(|dir| dir.join(filename))
    }
}
