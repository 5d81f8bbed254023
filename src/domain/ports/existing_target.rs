//! ExistingTargetStrategy port
//!
//! Decides, before and after generation, whether and how generated content
//! reaches a target file that may already exist.

use std::fmt::Debug;
use std::path::PathBuf;

use crate::domain::entities::UnitConfiguration;
use crate::domain::outlet::OutletResult;
use crate::domain::value_objects::Encoding;
use crate::error::WeaverResult;

/// The file one model node generates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFile {
    pub output_dir_key: String,
    pub filename: String,
    /// Absolute location, output directory joined with filename
    pub path: PathBuf,
    pub encoding: Encoding,
}

pub trait ExistingTargetStrategy: Send + Sync + Debug {
    /// Name selecting this strategy in output declarations
    fn name(&self) -> &'static str;

    /// Returns false to skip generation for this target entirely.
    fn before_generation(&self, target: &TargetFile, unit: &UnitConfiguration)
        -> WeaverResult<bool>;

    /// Writes `content` (already postprocessed) to the target.
    fn after_generation(
        &self,
        target: &TargetFile,
        content: &OutletResult,
        unit: &UnitConfiguration,
    ) -> WeaverResult<()>;
}
