//! Inline source provider: one model document embedded in the configuration

use super::document::DocumentFormat;
use crate::domain::entities::{Source, UnitConfiguration};
use crate::domain::ports::SourceProvider;
use crate::error::SourceError;

#[derive(Debug, Clone)]
pub struct InlineSourceProvider {
    document: String,
    format: DocumentFormat,
    done: bool,
}

impl InlineSourceProvider {
    pub fn new(document: impl Into<String>, format: DocumentFormat) -> Self {
        Self {
            document: document.into(),
            format,
            done: false,
        }
    }
}

impl SourceProvider for InlineSourceProvider {
    fn init(&mut self, _unit: &UnitConfiguration) -> Result<(), SourceError> {
        self.done = false;
        Ok(())
    }

    fn has_next(&self) -> bool {
        !self.done
    }

    fn next_source(&mut self) -> Result<Option<Source>, SourceError> {
        if self.done {
            return Ok(None);
        }
        self.done = true;
        let root = self
            .format
            .parse(&self.document)
            .map_err(|message| SourceError::Parse {
                path: "<inline>".into(),
                message,
            })?;
        Ok(Some(Source::new(root, self.description())))
    }

    fn description(&self) -> String {
        "inline document".to_string()
    }
}
