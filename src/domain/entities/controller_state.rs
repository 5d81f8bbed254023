//! Mutable per-run state shared by the pipeline and executing outlets

use std::path::{Path, PathBuf};

use super::{Checksums, ModelNode, ModelPath};
use crate::domain::services::{SourceChangeTracker, VariableStore};
use crate::domain::value_objects::{Namespace, QualifiedName};

/// One entry of the outlet call stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutletFrame {
    /// Name the outlet was registered under
    pub name: QualifiedName,
    /// Default namespace for option and variable lookups while it runs
    pub namespace: Namespace,
}

/// Single-threaded context of one controller run.
///
/// The controller sets and clears fields while descending through
/// units, outputs, sources and model nodes; outlets read the model position
/// and use the variable store.
#[derive(Debug, Default)]
pub struct ControllerState {
    pub unit_name: String,
    pub template_set: String,
    pub output_name: Option<String>,
    pub source_description: Option<String>,
    pub source_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    /// Loaded before the first output of a unit
    pub last_checksums: Checksums,
    /// Accumulated during the unit, persisted afterwards
    pub this_checksums: Checksums,
    pub variables: VariableStore,
    pub source_changes: SourceChangeTracker,
    root: Option<ModelNode>,
    current_path: ModelPath,
    outlet_stack: Vec<OutletFrame>,
}

impl ControllerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets unit-scoped fields. Variables with run scope survive.
    pub fn begin_unit(&mut self, unit_name: &str, template_set: &str) {
        self.unit_name = unit_name.to_string();
        self.template_set = template_set.to_string();
        self.output_name = None;
        self.clear_source();
        self.last_checksums = Checksums::new();
        self.this_checksums = Checksums::new();
        self.source_changes = SourceChangeTracker::new();
    }

    pub fn set_source(&mut self, description: &str, file: Option<&Path>, root: ModelNode) {
        self.source_description = Some(description.to_string());
        self.source_file = file.map(Path::to_path_buf);
        self.root = Some(root);
        self.current_path = ModelPath::root();
    }

    pub fn clear_source(&mut self) {
        self.source_description = None;
        self.source_file = None;
        self.output_file = None;
        self.root = None;
        self.current_path = ModelPath::root();
    }

    pub fn root(&self) -> Option<&ModelNode> {
        self.root.as_ref()
    }

    pub fn current_path(&self) -> &ModelPath {
        &self.current_path
    }

    pub fn set_current_path(&mut self, path: ModelPath) {
        self.current_path = path;
    }

    /// Node at the current path, if a source is active and the path exists.
    pub fn current_node(&self) -> Option<&ModelNode> {
        self.root.as_ref()?.node_at(&self.current_path)
    }

    /// Readable location for error context, e.g. `/database/table[2]`.
    pub fn describe_current_path(&self) -> String {
        match &self.root {
            Some(root) => self.current_path.describe(root),
            None => String::from("-"),
        }
    }

    pub fn push_outlet(&mut self, frame: OutletFrame) {
        self.outlet_stack.push(frame);
    }

    pub fn pop_outlet(&mut self) -> Option<OutletFrame> {
        self.outlet_stack.pop()
    }

    pub fn current_outlet(&self) -> Option<&OutletFrame> {
        self.outlet_stack.last()
    }

    pub fn outlet_stack(&self) -> &[OutletFrame] {
        &self.outlet_stack
    }

    /// Namespace for unqualified lookups: that of the running outlet, else root.
    pub fn current_namespace(&self) -> Namespace {
        self.current_outlet()
            .map(|frame| frame.namespace.clone())
            .unwrap_or_default()
    }

    /// End of one generated file.
    pub fn end_file(&mut self) {
        self.variables.end_file();
        self.output_file = None;
    }

    /// End of one generation unit.
    pub fn end_generation(&mut self) {
        self.variables.end_generation();
        self.output_name = None;
        self.clear_source();
    }
}
