//! Component factory port
//!
//! Configuration names components by type tag (`type = "template"`); a
//! factory turns tag plus parameters into a live component. Unknown tags
//! are configuration errors.

use std::path::Path;
use std::sync::Arc;

use super::{
    ExistingTargetStrategy, SkipDecider, SourceProvider, SourceTransformer, StringProcessor,
};
use crate::domain::entities::ComponentSpec;
use crate::domain::outlet::Outlet;
use crate::domain::value_objects::QualifiedName;
use crate::error::ConfigurationError;

pub trait ComponentFactory: Send + Sync {
    /// Outlet registered as `name`; relative file parameters resolve
    /// against `base_dir`.
    fn outlet(
        &self,
        name: QualifiedName,
        spec: &ComponentSpec,
        base_dir: &Path,
    ) -> Result<Arc<dyn Outlet>, ConfigurationError>;

    fn source_provider(
        &self,
        spec: &ComponentSpec,
    ) -> Result<Box<dyn SourceProvider>, ConfigurationError>;

    fn transformer(
        &self,
        spec: &ComponentSpec,
    ) -> Result<Box<dyn SourceTransformer>, ConfigurationError>;

    fn skip_decider(&self, spec: &ComponentSpec)
        -> Result<Box<dyn SkipDecider>, ConfigurationError>;

    fn processor(&self, spec: &ComponentSpec)
        -> Result<Box<dyn StringProcessor>, ConfigurationError>;

    /// Strategy registered under `name`, if any
    fn strategy(&self, name: &str) -> Option<Arc<dyn ExistingTargetStrategy>>;
}
