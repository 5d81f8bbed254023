//! Error types for Weaver
//!
//! Uses `thiserror` for library errors. The binary wraps them in `anyhow`
//! and maps [`ErrorCategory`] to exit codes.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::outlet::ResultKind;
pub use crate::domain::ports::checksums_repository::ChecksumsError;
pub use crate::domain::ports::file_system::FsError;
use crate::domain::value_objects::{EncodingError, InvalidNameError, QualifiedName};

/// Result type alias for Weaver operations
pub type WeaverResult<T> = Result<T, WeaverError>;

/// Malformed or inconsistent declarations. Always fatal, reported as early
/// as possible (configuration time rather than generation time).
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error(transparent)]
    InvalidName(#[from] InvalidNameError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// Unit file could not be read
    #[error("cannot read configuration {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Unit file is not valid TOML for the expected schema
    #[error("invalid configuration in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("unknown existing target strategy '{name}' for output '{output}'")]
    UnknownStrategy { output: String, name: String },

    #[error("unknown {kind} type '{type_tag}'")]
    UnknownComponentType { kind: &'static str, type_tag: String },

    #[error("outlet '{name}' referenced by {referenced_by} is not defined")]
    UnknownOutlet { name: String, referenced_by: String },

    #[error("outlet '{name}' is defined more than once")]
    DuplicateOutlet { name: String },

    #[error("outlet '{outlet}' has no mergepoints; cannot map mergepoint '{mergepoint}'")]
    MergepointsNotSupported { outlet: String, mergepoint: String },

    #[error("output '{output}' has neither a filename nor a filename outlet")]
    MissingFilename { output: String },

    #[error("filename outlet '{outlet}' of output '{output}' produced bytes, expected text")]
    FilenameNotText { output: String, outlet: String },

    #[error("output '{output}' refers to unknown output directory key '{key}'")]
    UnknownOutputDir { output: String, key: String },

    #[error("{component}: missing required parameter '{parameter}'")]
    MissingParameter { component: String, parameter: String },

    #[error("{component}: invalid parameter '{parameter}': {message}")]
    InvalidParameter {
        component: String,
        parameter: String,
        message: String,
    },

    #[error("template of outlet '{outlet}': {message}")]
    Template { outlet: String, message: String },

    #[error("invalid selector '{expression}': {message}")]
    Selector { expression: String, message: String },
}

/// A source could not be read, parsed or transformed.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("cannot read source {path}: {cause}")]
    Read { path: PathBuf, cause: FsError },

    #[error("cannot parse source {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid include pattern: {message}")]
    Pattern { message: String },

    #[error("transformer '{transformer}' failed: {message}")]
    Transform { transformer: String, message: String },

    #[error("transformer '{transformer}' returned an empty root element")]
    EmptyRoot { transformer: String },
}

/// Failure while an outlet executes or a mergepoint chain resolves.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("outlet '{name}' not found")]
    OutletNotFound { name: String },

    #[error("mergepoint '{mergepoint}' of outlet '{outlet}' invoked '{producer}', which produces bytes")]
    MergepointBytes {
        outlet: QualifiedName,
        mergepoint: String,
        producer: QualifiedName,
    },

    #[error("mergepoint '{mergepoint}' invoked outside of any outlet")]
    NoActiveOutlet { mergepoint: String },

    #[error("outlet result is {actual}, not {expected}")]
    WrongResultKind {
        expected: ResultKind,
        actual: ResultKind,
    },

    #[error("no current model node")]
    NoCurrentNode,

    #[error("option '{key}' is not set in namespace '{namespace}'")]
    MissingOption { key: String, namespace: String },

    #[error("variable '{key}' is not set in namespace '{namespace}'")]
    MissingVariable { key: String, namespace: String },

    #[error("attribute '{attribute}' missing on element '{element}'")]
    MissingAttribute { attribute: String, element: String },

    #[error("outlet nesting deeper than {limit} at '{outlet}' (recursive mergepoint?)")]
    RecursionLimit { outlet: QualifiedName, limit: usize },

    #[error("postprocessor '{processor}' failed: {message}")]
    Postprocess { processor: String, message: String },

    #[error("cannot merge into {path}: {message}")]
    Merge { path: PathBuf, message: String },

    #[error(transparent)]
    InvalidName(#[from] InvalidNameError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// Main error type for Weaver operations
#[derive(Error, Debug)]
pub enum WeaverError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Checksums(#[from] ChecksumsError),

    #[error(transparent)]
    Fs(#[from] FsError),

    /// Failure at a specific place in the pipeline
    #[error("output '{output}', source '{source_description}', node '{model_path}'")]
    Context {
        output: String,
        source_description: String,
        model_path: String,
        #[source]
        cause: Box<WeaverError>,
    },

    /// A generation unit aborted
    #[error("generation unit '{unit}' failed")]
    Unit {
        unit: String,
        #[source]
        cause: Box<WeaverError>,
    },
}

/// Coarse classification used for process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Source,
    Generation,
    Other,
}

impl ErrorCategory {
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorCategory::Configuration => 2,
            ErrorCategory::Source => 3,
            ErrorCategory::Generation => 4,
            ErrorCategory::Other => 1,
        }
    }
}

impl WeaverError {
    /// Category of the innermost error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            WeaverError::Configuration(_) => ErrorCategory::Configuration,
            WeaverError::Source(_) => ErrorCategory::Source,
            WeaverError::Generation(_) => ErrorCategory::Generation,
            WeaverError::Checksums(_) | WeaverError::Fs(_) => ErrorCategory::Other,
            WeaverError::Context { cause, .. } | WeaverError::Unit { cause, .. } => {
                cause.category()
            }
        }
    }

    pub(crate) fn in_unit(self, unit: &str) -> Self {
        WeaverError::Unit {
            unit: unit.to_string(),
            cause: Box::new(self),
        }
    }
}

impl From<InvalidNameError> for WeaverError {
    fn from(err: InvalidNameError) -> Self {
        WeaverError::Configuration(err.into())
    }
}
