//! Weaver - template-driven code generation engine
//!
//! A generation unit declares outlets (named, composable generators),
//! mergepoints wiring outlets together, and outputs that run a content
//! outlet once per selected node of each source model. Unchanged sources
//! can be skipped using the checksums of the previous run.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::generate::{Controller, GenerationReport, LogSettings, UnitReport};
pub use config::{load_unit, ConfigWarning, Overrides, DEFAULT_UNIT_FILE};
pub use domain::entities::UnitConfiguration;
pub use error::{ErrorCategory, WeaverError, WeaverResult};
pub use infrastructure::{JsonEventSink, LocalFs, Plugins, TextChecksumsRepository, TracingEventSink};
