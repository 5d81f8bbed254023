//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod checksums_repository;
pub mod components;
pub mod existing_target;
pub mod file_system;
pub mod generation_events;
pub mod source;
pub mod string_processor;

pub use checksums_repository::{ChecksumsError, ChecksumsRepository, ChecksumsResult};
pub use components::ComponentFactory;
pub use existing_target::{ExistingTargetStrategy, TargetFile};
pub use file_system::{FileSystem, FsError, FsResult};
pub use generation_events::{GenerationEvent, GenerationEventSink, NoopEventSink};
pub use source::{SkipDecider, SourceProvider, SourceTransformer};
pub use string_processor::StringProcessor;
