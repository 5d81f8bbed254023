use std::sync::Arc;

use crate::domain::entities::UnitConfiguration;
use crate::domain::outlet::OutletResult;
use crate::domain::ports::{ExistingTargetStrategy, FileSystem, TargetFile};
use crate::error::WeaverResult;

/// Adds generated content after whatever the target already holds
#[derive(Clone)]
pub struct AppendStrategy {
    fs: Arc<dyn FileSystem>,
}

impl AppendStrategy {
    pub const NAME: &'static str = "append";

    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl std::fmt::Debug for AppendStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AppendStrategy")
    }
}

impl ExistingTargetStrategy for AppendStrategy {
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
        let mut bytes = if self.fs.exists(&target.path) {
            self.fs.read_bytes(&target.path)?
        } else {
            Vec::new()
        };
        bytes.extend(super::encode(target, content)?);
        self.fs.write_bytes(&target.path, &bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::fs::LocalFs;
    use crate::infrastructure::strategies::test_support::{target, unit};
    use tempfile::tempdir;

    #[test]
    fn appends_to_existing_and_creates_missing() {
        let dir = tempdir().unwrap();
        let unit = unit(dir.path());
        let strategy = AppendStrategy::new(Arc::new(LocalFs::new()));
        let target = target(dir.path(), "log.txt");

        strategy
            .after_generation(&target, &OutletResult::Text("one\n".into()), &unit)
            .unwrap();
        strategy
            .after_generation(&target, &OutletResult::Text("two\n".into()), &unit)
            .unwrap();

        assert_eq!(std::fs::read_to_string(&target.path).unwrap(), "one\ntwo\n");
    }
}
