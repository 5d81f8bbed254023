use std::sync::Arc;

use crate::domain::entities::UnitConfiguration;
use crate::domain::outlet::OutletResult;
use crate::domain::ports::{ExistingTargetStrategy, FileSystem, TargetFile};
use crate::error::WeaverResult;

/// Overwrites the target unconditionally
#[derive(Clone)]
pub struct ReplaceStrategy {
    fs: Arc<dyn FileSystem>,
}

impl ReplaceStrategy {
    pub const NAME: &'static str = "replace";

    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl std::fmt::Debug for ReplaceStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ReplaceStrategy")
    }
}

impl ExistingTargetStrategy for ReplaceStrategy {
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
        let bytes = super::encode(target, content)?;
        self.fs.write_bytes(&target.path, &bytes)?;
        Ok(())
    }
}
