//! Source entity - one model document yielded by a source provider

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::model::ModelNode;
use crate::domain::value_objects::ContentChecksum;

/// A parsed source with the metadata the incremental build needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    root: ModelNode,
    file: Option<PathBuf>,
    last_modified: Option<DateTime<Utc>>,
    checksum: Option<ContentChecksum>,
    description: String,
}

impl Source {
    pub fn new(root: ModelNode, description: impl Into<String>) -> Self {
        Self {
            root,
            file: None,
            last_modified: None,
            checksum: None,
            description: description.into(),
        }
    }

    /// Source read from `file`
    pub fn from_file(
        root: ModelNode,
        file: impl Into<PathBuf>,
        last_modified: Option<DateTime<Utc>>,
        checksum: ContentChecksum,
    ) -> Self {
        let file = file.into();
        Self {
            root,
            description: file.display().to_string(),
            file: Some(file),
            last_modified,
            checksum: Some(checksum),
        }
    }

    pub fn root_element(&self) -> &ModelNode {
        &self.root
    }

    pub fn into_root_element(self) -> ModelNode {
        self.root
    }

    pub fn source_file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    pub fn content_checksum(&self) -> Option<&ContentChecksum> {
        self.checksum.as_ref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
