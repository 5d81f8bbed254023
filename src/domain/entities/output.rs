//! Output declarations

use std::path::{Path, PathBuf};

use super::{ComponentSpec, SourceSpec};
use crate::domain::outlet::OutletRef;
use crate::domain::value_objects::{Encoding, LineBreak, LineBreakPolicy, QualifiedName};
use crate::error::ConfigurationError;

/// Key of the output directory used when an output names none
pub const DEFAULT_OUTPUT_DIR_KEY: &str = "default";

/// Name of the strategy used when an output names none
pub const DEFAULT_EXISTING_TARGET_STRATEGY: &str = "replace";

/// How an output's file name is obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilenameSource {
    Fixed(String),
    /// Executed per model node; must produce text
    Outlet(OutletRef),
}

impl FilenameSource {
    /// Exactly one of `filename` and `outlet` must be given.
    pub fn from_parts(
        output: &str,
        filename: Option<String>,
        outlet: Option<OutletRef>,
    ) -> Result<Self, ConfigurationError> {
        match (filename, outlet) {
            (Some(name), None) => Ok(FilenameSource::Fixed(name)),
            (None, Some(outlet)) => Ok(FilenameSource::Outlet(outlet)),
            (None, None) => Err(ConfigurationError::MissingFilename {
                output: output.to_string(),
            }),
            (Some(_), Some(_)) => Err(ConfigurationError::InvalidParameter {
                component: format!("output '{}'", output),
                parameter: "filename".to_string(),
                message: "set either filename or filename_outlet, not both".to_string(),
            }),
        }
    }
}

/// One kind of generated file: which sources feed it, which outlet renders
/// it and how it lands on disk.
#[derive(Debug, Clone)]
pub struct Output {
    name: QualifiedName,
    source: SourceSpec,
    filename: FilenameSource,
    resolved_filename: Option<String>,
    content_outlet: OutletRef,
    postprocessors: Vec<ComponentSpec>,
    existing_target_strategy: String,
    output_dir_key: String,
    encoding: Encoding,
    line_break: LineBreakPolicy,
    line_break_cache: Option<(PathBuf, LineBreak)>,
}

impl Output {
    pub fn new(name: QualifiedName, content_outlet: OutletRef, filename: FilenameSource) -> Self {
        Self {
            name,
            source: SourceSpec::default(),
            filename,
            resolved_filename: None,
            content_outlet,
            postprocessors: Vec::new(),
            existing_target_strategy: DEFAULT_EXISTING_TARGET_STRATEGY.to_string(),
            output_dir_key: DEFAULT_OUTPUT_DIR_KEY.to_string(),
            encoding: Encoding::default(),
            line_break: LineBreakPolicy::default(),
            line_break_cache: None,
        }
    }

    pub fn with_source(mut self, source: SourceSpec) -> Self {
        self.source = source;
        self
    }

    pub fn with_postprocessors(mut self, postprocessors: Vec<ComponentSpec>) -> Self {
        self.postprocessors = postprocessors;
        self
    }

    pub fn with_existing_target_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.existing_target_strategy = strategy.into();
        self
    }

    pub fn with_output_dir_key(mut self, key: impl Into<String>) -> Self {
        self.output_dir_key = key.into();
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_line_break(mut self, policy: LineBreakPolicy) -> Self {
        self.line_break = policy;
        self
    }

    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    pub fn source(&self) -> &SourceSpec {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut SourceSpec {
        &mut self.source
    }

    pub fn filename_source(&self) -> &FilenameSource {
        &self.filename
    }

    pub fn content_outlet(&self) -> &OutletRef {
        &self.content_outlet
    }

    pub fn postprocessors(&self) -> &[ComponentSpec] {
        &self.postprocessors
    }

    pub fn existing_target_strategy(&self) -> &str {
        &self.existing_target_strategy
    }

    pub fn output_dir_key(&self) -> &str {
        &self.output_dir_key
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn line_break(&self) -> LineBreakPolicy {
        self.line_break
    }

    /// Filename computed for the model node being generated.
    pub fn resolved_filename(&self) -> Option<&str> {
        match &self.filename {
            FilenameSource::Fixed(name) => Some(name),
            FilenameSource::Outlet(_) => self.resolved_filename.as_deref(),
        }
    }

    pub fn set_resolved_filename(&mut self, filename: impl Into<String>) {
        self.resolved_filename = Some(filename.into());
    }

    pub fn clear_resolved_filename(&mut self) {
        self.resolved_filename = None;
    }

    /// Line break detected earlier in the file at `path`.
    pub fn cached_line_break(&self, path: &Path) -> Option<LineBreak> {
        match &self.line_break_cache {
            Some((cached, line_break)) if cached == path => Some(*line_break),
            _ => None,
        }
    }

    pub fn cache_line_break(&mut self, path: &Path, line_break: LineBreak) {
        self.line_break_cache = Some((path.to_path_buf(), line_break));
    }
}
