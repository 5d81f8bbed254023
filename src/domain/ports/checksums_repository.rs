//! ChecksumsRepository port - persistence of source-change checksums
//!
//! Keeps the text format out of the domain; the controller only loads the
//! checksums of the previous run and saves those of the current one.

use std::path::Path;

use super::FsError;
use crate::domain::entities::Checksums;

/// Result type for checksums persistence
pub type ChecksumsResult<T> = Result<T, ChecksumsError>;

/// Checksums persistence errors
#[derive(Debug)]
pub enum ChecksumsError {
    /// A record that does not follow `timestamp-checksum-key`
    MalformedRecord {
        line: usize,
        record: String,
        reason: String,
    },
    /// I/O error
    Io(FsError),
}

impl std::fmt::Display for ChecksumsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChecksumsError::MalformedRecord {
                line,
                record,
                reason,
            } => write!(
                f,
                "Malformed checksums record at line {}: {} ({})",
                line, record, reason
            ),
            ChecksumsError::Io(err) => write!(f, "Checksums I/O error: {}", err),
        }
    }
}

impl std::error::Error for ChecksumsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChecksumsError::Io(err) => Some(err),
            ChecksumsError::MalformedRecord { .. } => None,
        }
    }
}

impl From<FsError> for ChecksumsError {
    fn from(err: FsError) -> Self {
        ChecksumsError::Io(err)
    }
}

/// Abstract repository for checksums persistence
pub trait ChecksumsRepository: Send + Sync {
    /// Load checksums; a missing file yields empty checksums.
    fn load(&self, path: &Path) -> ChecksumsResult<Checksums>;

    /// Save checksums, keeping entries already on disk for keys not present
    /// in `checksums`.
    fn save(&self, checksums: &Checksums, path: &Path) -> ChecksumsResult<()>;
}
