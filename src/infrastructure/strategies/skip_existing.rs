use std::sync::Arc;

use crate::domain::entities::UnitConfiguration;
use crate::domain::outlet::OutletResult;
use crate::domain::ports::{ExistingTargetStrategy, FileSystem, TargetFile};
use crate::error::WeaverResult;

/// Generates only targets that do not exist yet
#[derive(Clone)]
pub struct SkipExistingStrategy {
    fs: Arc<dyn FileSystem>,
}

impl SkipExistingStrategy {
    pub const NAME: &'static str = "skipExisting";

    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl std::fmt::Debug for SkipExistingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SkipExistingStrategy")
    }
}

impl ExistingTargetStrategy for SkipExistingStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn before_generation(&self, target: &TargetFile, _unit: &UnitConfiguration) -> WeaverResult<bool> {
        Ok(!self.fs.exists(&target.path))
    }

    fn after_generation(
        &self,
        target: &TargetFile,
        content: &OutletResult,
        _unit: &UnitConfiguration,
    ) -> WeaverResult<()> {
        let bytes = super::encode(target, content)?;
        self.fs.write_bytes(&target.path, &bytes)?;
        Ok(())
    }
}
