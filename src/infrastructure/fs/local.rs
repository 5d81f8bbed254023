//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

/// Local file system implementation
///
/// Writes go to a temporary file in the target directory which is then
/// renamed over the target, so readers never observe a partial file.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn read_bytes(&self, path: &Path) -> FsResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| FsError::at(path, e))
    }

    fn write_bytes(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| FsError::at(parent, e))?;

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| FsError::at(parent, e))?;
        temp.write_all(content).map_err(|e| FsError::at(path, e))?;
        temp.flush().map_err(|e| FsError::at(path, e))?;
        temp.persist(path).map_err(|e| FsError::at(path, e.error))?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        std::fs::create_dir_all(path).map_err(|e| FsError::at(path, e))
    }

    fn modified(&self, path: &Path) -> FsResult<DateTime<Utc>> {
        let metadata = std::fs::metadata(path).map_err(|e| FsError::at(path, e))?;
        let modified = metadata.modified().map_err(|e| FsError::at(path, e))?;
        Ok(DateTime::<Utc>::from(modified))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn local_fs_write_and_read() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("test.txt");
        let fs = LocalFs::new();

        fs.write_bytes(&file, b"hello world").unwrap();
        let content = fs.read(&file).unwrap();

        assert_eq!(content, "hello world");
    }

    #[test]
    fn local_fs_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("nested").join("dir").join("test.txt");
        let fs = LocalFs::new();

        fs.write_bytes(&file, b"content").unwrap();

        assert!(file.exists());
    }

    #[test]
    fn local_fs_write_replaces_existing() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("test.txt");
        std::fs::write(&file, "Original").unwrap();

        LocalFs::new().write_bytes(&file, b"Replaced").unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "Replaced");
    }

    #[test]
    fn local_fs_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();
        let err = fs.read_bytes(&dir.path().join("missing")).unwrap_err();
        assert!(err.is_not_found());
        assert!(fs.modified(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn local_fs_modified_is_recent() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("m.txt");
        let fs = LocalFs::new();
        fs.write_bytes(&file, b"x").unwrap();

        let modified = fs.modified(&file).unwrap();
        let age = Utc::now() - modified;
        assert!(age.num_seconds() < 60);
    }
}
