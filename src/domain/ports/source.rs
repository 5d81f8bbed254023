//! Source ports
//!
//! Source providers yield model documents, transformers rewrite them before
//! node selection, and skip deciders veto single model nodes.

use std::fmt::Debug;

use crate::domain::entities::{ControllerState, ModelNode, Source, UnitConfiguration};
use crate::error::SourceError;

/// Yields the sources of one output.
///
/// A fresh provider is built per output from its merged source settings, so
/// implementations can keep iteration state in `self`.
pub trait SourceProvider: Send + Debug {
    /// Prepare iteration, e.g. scan directories relative to the unit.
    fn init(&mut self, unit: &UnitConfiguration) -> Result<(), SourceError>;

    fn has_next(&self) -> bool;

    /// Next source; `Ok(None)` once exhausted.
    fn next_source(&mut self) -> Result<Option<Source>, SourceError>;

    /// Human-readable description for logs and errors
    fn description(&self) -> String;
}

/// Rewrites a source root before nodes are selected from it.
pub trait SourceTransformer: Send + Sync + Debug {
    fn name(&self) -> &str;

    fn transform(&self, root: ModelNode, state: &ControllerState) -> Result<ModelNode, SourceError>;
}

/// Decides whether the current model node is generated at all.
pub trait SkipDecider: Send + Sync + Debug {
    fn proceed(&self, state: &ControllerState) -> bool;
}
