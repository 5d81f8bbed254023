//! Outlets and mergepoints
//!
//! An outlet is a named unit producing text or bytes for the current model
//! node. Outlets that accept mergepoints invoke them by name during
//! execution; each mergepoint resolves to an ordered chain of other outlets
//! whose text results are concatenated.

mod builtin;
mod context;
mod mergepoint;
mod registry;
mod template;

use std::fmt;

pub use builtin::{
    AttributeOutlet, BytesOutlet, ChildrenOutlet, SetVariableOutlet, TemplateOutlet, TextOutlet,
};
pub use context::{ExecutionContext, MAX_OUTLET_DEPTH};
pub use mergepoint::{MergepointMapping, MergepointPosition};
pub use registry::{OutletEntry, OutletRegistry};
pub use template::{CaseTransform, Template, TemplateSyntaxError};

use crate::domain::value_objects::{InvalidNameError, Namespace, QualifiedName};
use crate::error::GenerationError;

/// Which accessor of an [`OutletResult`] is valid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Text,
    Bytes,
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultKind::Text => write!(f, "text"),
            ResultKind::Bytes => write!(f, "bytes"),
        }
    }
}

/// Output of one outlet execution; text and bytes are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutletResult {
    Text(String),
    Bytes(Vec<u8>),
}

impl OutletResult {
    pub fn kind(&self) -> ResultKind {
        match self {
            OutletResult::Text(_) => ResultKind::Text,
            OutletResult::Bytes(_) => ResultKind::Bytes,
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind() == ResultKind::Text
    }

    pub fn as_text(&self) -> Result<&str, GenerationError> {
        match self {
            OutletResult::Text(text) => Ok(text),
            OutletResult::Bytes(_) => Err(self.wrong_kind(ResultKind::Text)),
        }
    }

    pub fn as_bytes(&self) -> Result<&[u8], GenerationError> {
        match self {
            OutletResult::Bytes(bytes) => Ok(bytes),
            OutletResult::Text(_) => Err(self.wrong_kind(ResultKind::Bytes)),
        }
    }

    pub fn into_text(self) -> Result<String, GenerationError> {
        match self {
            OutletResult::Text(text) => Ok(text),
            OutletResult::Bytes(_) => Err(self.wrong_kind(ResultKind::Text)),
        }
    }

    fn wrong_kind(&self, expected: ResultKind) -> GenerationError {
        GenerationError::WrongResultKind {
            expected,
            actual: self.kind(),
        }
    }
}

/// Reference to an outlet by qualified name, optionally run under another
/// namespace than the one embedded in the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutletRef {
    pub name: QualifiedName,
    pub namespace_override: Option<Namespace>,
}

impl OutletRef {
    pub fn new(name: QualifiedName) -> Self {
        Self {
            name,
            namespace_override: None,
        }
    }

    /// `a.b.c` names outlet `c` in `a.b`; a bare name lives in `default_namespace`.
    pub fn parse(reference: &str, default_namespace: &Namespace) -> Result<Self, InvalidNameError> {
        Ok(Self::new(QualifiedName::resolve(reference, default_namespace)?))
    }

    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace_override = Some(namespace);
        self
    }

    /// Namespace the referenced outlet runs in.
    pub fn execution_namespace(&self) -> &Namespace {
        self.namespace_override
            .as_ref()
            .unwrap_or_else(|| self.name.namespace())
    }
}

impl fmt::Display for OutletRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace_override {
            Some(ns) => write!(f, "{} (in {})", self.name, ns),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Executable unit of generation output.
///
/// The context pushes a frame for the outlet before `before_execute` and
/// pops it after `after_execute`, also when one of them fails.
pub trait Outlet: Send + Sync + fmt::Debug {
    fn name(&self) -> &QualifiedName;

    /// Type tag the outlet was constructed from
    fn type_tag(&self) -> &'static str;

    /// Leaf outlets reject mergepoint mappings at configuration time.
    fn accepts_mergepoints(&self) -> bool {
        false
    }

    fn before_execute(&self, _ctx: &mut ExecutionContext<'_>) -> Result<(), GenerationError> {
        Ok(())
    }

    fn execute(&self, ctx: &mut ExecutionContext<'_>) -> Result<OutletResult, GenerationError>;

    fn after_execute(&self, _ctx: &mut ExecutionContext<'_>) -> Result<(), GenerationError> {
        Ok(())
    }
}
