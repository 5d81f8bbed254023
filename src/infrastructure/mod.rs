//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system
//! - `repositories/` - Checksums file repository
//! - `strategies/` - Existing-target strategies
//! - `sources/` - Source providers and model document parsing
//! - `events/` - Generation event sinks
//! - `plugins` - Type-tag registry for all pluggable components

pub mod events;
pub mod fs;
pub mod plugins;
pub mod processors;
pub mod repositories;
pub mod skip_deciders;
pub mod sources;
pub mod strategies;
pub mod transformers;

// Re-export for convenience
pub use events::{JsonEventSink, TracingEventSink};
pub use fs::LocalFs;
pub use plugins::Plugins;
pub use repositories::TextChecksumsRepository;
