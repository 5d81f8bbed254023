//! Existing-target strategies
//!
//! - `replace` - always overwrite
//! - `skipExisting` - leave existing files alone, skip generation
//! - `append` - add new content after existing content
//! - `merge` - keep user regions of the existing file

mod append;
mod merge;
mod replace;
mod skip_existing;

use std::sync::Arc;

pub use append::AppendStrategy;
pub use merge::MergeStrategy;
pub use replace::ReplaceStrategy;
pub use skip_existing::SkipExistingStrategy;

use crate::domain::outlet::OutletResult;
use crate::domain::ports::{ExistingTargetStrategy, FileSystem, TargetFile};
use crate::error::{GenerationError, WeaverResult};

/// Bytes to write for `content` in the target's encoding.
pub(crate) fn encode(target: &TargetFile, content: &OutletResult) -> WeaverResult<Vec<u8>> {
    match content {
        OutletResult::Text(text) => Ok(target
            .encoding
            .encode(text)
            .map_err(GenerationError::from)?),
        OutletResult::Bytes(bytes) => Ok(bytes.clone()),
    }
}

/// All built-in strategies sharing one file system
pub fn builtin_strategies(fs: Arc<dyn FileSystem>) -> Vec<Arc<dyn ExistingTargetStrategy>> {
    vec![
        Arc::new(ReplaceStrategy::new(fs.clone())),
        Arc::new(SkipExistingStrategy::new(fs.clone())),
        Arc::new(AppendStrategy::new(fs.clone())),
        Arc::new(MergeStrategy::new(fs)),
    ]
}
