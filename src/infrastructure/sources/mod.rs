//! Source providers
//!
//! - `file` - model documents found below a directory
//! - `inline` - a single document embedded in the configuration

mod document;
mod file;
mod inline;

pub use document::{document_to_model, DocumentFormat, ARRAY_ITEM, DOCUMENT_ROOT};
pub use file::{FileSourceProvider, DEFAULT_INCLUDES};
pub use inline::InlineSourceProvider;
