//! File source provider
//!
//! Walks a directory below the unit's base directory and yields every model
//! document matching the include globs, in path order.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;

use super::document::DocumentFormat;
use crate::domain::entities::{Source, UnitConfiguration};
use crate::domain::ports::{FileSystem, FsError, SourceProvider};
use crate::domain::value_objects::ContentChecksum;
use crate::error::SourceError;

/// Globs used when a provider names none
pub const DEFAULT_INCLUDES: &[&str] = &["*.json", "*.yaml", "*.yml", "*.toml"];

pub struct FileSourceProvider {
    fs: Arc<dyn FileSystem>,
    base_dir: PathBuf,
    include: Vec<String>,
    exclude: Vec<String>,
    format: Option<DocumentFormat>,
    root: PathBuf,
    pending: VecDeque<PathBuf>,
}

impl FileSourceProvider {
    pub fn new(fs: Arc<dyn FileSystem>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            base_dir: base_dir.into(),
            include: DEFAULT_INCLUDES.iter().map(|s| s.to_string()).collect(),
            exclude: Vec::new(),
            format: None,
            root: PathBuf::new(),
            pending: VecDeque::new(),
        }
    }

    pub fn with_include(mut self, include: Vec<String>) -> Self {
        self.include = include;
        self
    }

    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Parse every file in this format instead of going by extension.
    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = Some(format);
        self
    }

    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>, SourceError> {
        let pattern_error = |e: ignore::Error| SourceError::Pattern {
            message: e.to_string(),
        };
        let mut overrides = OverrideBuilder::new(root);
        for glob in &self.include {
            overrides.add(glob).map_err(pattern_error)?;
        }
        for glob in &self.exclude {
            overrides.add(&format!("!{}", glob)).map_err(pattern_error)?;
        }
        let overrides = overrides.build().map_err(pattern_error)?;

        let mut files = Vec::new();
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .overrides(overrides)
            .sort_by_file_path(|a, b| a.cmp(b))
            .build();
        for entry in walker {
            let entry = entry.map_err(|e| SourceError::Read {
                path: root.to_path_buf(),
                cause: FsError::Other(e.to_string()),
            })?;
            if entry.file_type().is_some_and(|t| t.is_file()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn load(&self, path: &Path) -> Result<Source, SourceError> {
        let bytes = self.fs.read_bytes(path).map_err(|cause| SourceError::Read {
            path: path.to_path_buf(),
            cause,
        })?;
        let format = self
            .format
            .or_else(|| DocumentFormat::from_path(path))
            .ok_or_else(|| SourceError::Parse {
                path: path.to_path_buf(),
                message: "unknown document format; set `format`".to_string(),
            })?;
        let content = String::from_utf8(bytes.clone()).map_err(|_| SourceError::Parse {
            path: path.to_path_buf(),
            message: "not valid UTF-8".to_string(),
        })?;
        let root = format.parse(&content).map_err(|message| SourceError::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        // an unknown modification date makes the source count as modified
        let last_modified = self.fs.modified(path).ok();
        Ok(Source::from_file(
            root,
            path,
            last_modified,
            ContentChecksum::of(&bytes),
        ))
    }
}

impl std::fmt::Debug for FileSourceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSourceProvider")
            .field("base_dir", &self.base_dir)
            .field("include", &self.include)
            .field("exclude", &self.exclude)
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl SourceProvider for FileSourceProvider {
    fn init(&mut self, unit: &UnitConfiguration) -> Result<(), SourceError> {
        let root = unit.resolve_path(&self.base_dir);
        if !self.fs.exists(&root) {
            return Err(SourceError::Read {
                path: root.clone(),
                cause: FsError::NotFound(root),
            });
        }
        self.pending = self.scan(&root)?.into();
        self.root = root;
        Ok(())
    }

    fn has_next(&self) -> bool {
        !self.pending.is_empty()
    }

    fn next_source(&mut self) -> Result<Option<Source>, SourceError> {
        match self.pending.pop_front() {
            Some(path) => self.load(&path).map(Some),
            None => Ok(None),
        }
    }

    fn description(&self) -> String {
        format!("files {:?} in {}", self.include, self.root.display())
    }
}
