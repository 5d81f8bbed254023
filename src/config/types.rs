//! Configuration type definitions
//!
//! Serde schema of a unit file. Everything here is plain data; conversion
//! into domain types and validation happen in `build`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{ComponentSpec, ParamValue, Params, DEFAULT_CHECKSUMS_FILE};
use crate::domain::outlet::MergepointPosition;
use crate::domain::value_objects::LineBreakPolicy;

/// Default unit file name looked up by the CLI
pub const DEFAULT_UNIT_FILE: &str = "weaver.toml";

/// A complete unit file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitFile {
    pub unit: UnitSection,

    /// Option values keyed by (possibly qualified) option name
    #[serde(default)]
    pub options: BTreeMap<String, ParamValue>,

    /// Source settings inherited by every output
    #[serde(default)]
    pub source_defaults: Option<SourceSection>,

    #[serde(default)]
    pub outlets: Vec<OutletSection>,

    #[serde(default)]
    pub mergepoints: Vec<MergepointSection>,

    #[serde(default)]
    pub outputs: Vec<OutputSection>,
}

/// `[unit]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitSection {
    pub name: String,

    /// Prefix of source-change keys; defaults to the unit name
    #[serde(default)]
    pub template_set: Option<String>,

    /// Namespace for unqualified outlet, output and option names
    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default)]
    pub run_only_on_source_change: bool,

    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    #[serde(default = "default_checksums_file")]
    pub checksums_file: String,

    /// Relative to the unit file's directory
    #[serde(default)]
    pub base_dir: Option<PathBuf>,

    #[serde(default)]
    pub output_dirs: BTreeMap<String, PathBuf>,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".weaver")
}

fn default_checksums_file() -> String {
    DEFAULT_CHECKSUMS_FILE.to_string()
}

/// Source settings of an output, or the unit-wide defaults.
///
/// Keys other than the ones below are parameters of the provider named by
/// `type`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSection {
    /// Provider type tag
    #[serde(rename = "type", default)]
    pub provider: Option<String>,

    #[serde(default)]
    pub element: Option<String>,

    #[serde(default)]
    pub transformers: Option<Vec<ComponentSpec>>,

    #[serde(default)]
    pub skip_decider: Option<ComponentSpec>,

    #[serde(flatten)]
    pub params: Params,
}

/// `[[outlets]]` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutletSection {
    pub name: String,

    #[serde(flatten)]
    pub spec: ComponentSpec,
}

/// `[[mergepoints]]` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergepointSection {
    pub outlet: String,
    pub mergepoint: String,
    pub outlets: Vec<String>,
    #[serde(default)]
    pub position: MergepointPosition,
}

/// `[[outputs]]` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    pub name: String,
    pub content_outlet: String,

    #[serde(default)]
    pub filename: Option<String>,

    #[serde(default)]
    pub filename_outlet: Option<String>,

    /// Namespace the content and filename outlets run in
    #[serde(default)]
    pub outlet_namespace: Option<String>,

    #[serde(default)]
    pub existing_target_strategy: Option<String>,

    #[serde(default)]
    pub output_dir_key: Option<String>,

    #[serde(default)]
    pub encoding: Option<String>,

    #[serde(default)]
    pub line_break: LineBreakPolicy,

    #[serde(default)]
    pub postprocessors: Vec<ComponentSpec>,

    #[serde(default)]
    pub source: SourceSection,
}

/// Values that override the unit file, applied after loading.
///
/// Environment variables fill these first; CLI flags win over both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub run_only_on_source_change: Option<bool>,
    pub cache_dir: Option<PathBuf>,
}

impl Overrides {
    /// Layer `other` on top of `self`
    pub fn merged_with(self, other: Overrides) -> Overrides {
        Overrides {
            run_only_on_source_change: other
                .run_only_on_source_change
                .or(self.run_only_on_source_change),
            cache_dir: other.cache_dir.or(self.cache_dir),
        }
    }

    pub fn apply(&self, unit: &mut UnitSection) {
        if let Some(value) = self.run_only_on_source_change {
            unit.run_only_on_source_change = value;
        }
        if let Some(dir) = &self.cache_dir {
            unit.cache_dir = dir.clone();
        }
    }
}
