use std::sync::Arc;

use crate::domain::entities::UnitConfiguration;
use crate::domain::outlet::OutletResult;
use crate::domain::ports::{ExistingTargetStrategy, FileSystem, TargetFile};
use crate::domain::services::merge_user_regions;
use crate::error::{GenerationError, WeaverResult};

/// Regenerates the target but keeps the bodies of user regions
/// (`weaver:user-begin` / `weaver:user-end`) from the existing file.
#[derive(Clone)]
pub struct MergeStrategy {
    fs: Arc<dyn FileSystem>,
}

impl MergeStrategy {
    pub const NAME: &'static str = "merge";

    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl std::fmt::Debug for MergeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MergeStrategy")
    }
}

impl ExistingTargetStrategy for MergeStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn before_generation(&self, _target: &TargetFile, _unit: &UnitConfiguration) -> WeaverResult<bool> {
        Ok(true)
    }

    fn after_generation(
        &self,
        target: &TargetFile,
        content: &OutletResult,
        _unit: &UnitConfiguration,
    ) -> WeaverResult<()> {
        let merge_error = |message: String| GenerationError::Merge {
            path: target.path.clone(),
            message,
        };

        let generated = match content {
            OutletResult::Text(text) => text,
            OutletResult::Bytes(_) => {
                return Err(merge_error("binary content cannot be merged".to_string()).into())
            }
        };

        let merged = if self.fs.exists(&target.path) {
            let existing_bytes = self.fs.read_bytes(&target.path)?;
            let existing = target
                .encoding
                .decode(&existing_bytes)
                .map_err(GenerationError::from)?;
            merge_user_regions(&existing, generated).map_err(|e| merge_error(e.to_string()))?
        } else {
            generated.clone()
        };

        let bytes = super::encode(target, &OutletResult::Text(merged))?;
        self.fs.write_bytes(&target.path, &bytes)?;
        Ok(())
    }
}
