//! Generation Event Port
//!
//! Observable interface for generation runs: progress logging, NDJSON
//! event streams for CI, or nothing at all.

use std::path::PathBuf;

/// Event emitted while the controller runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationEvent {
    /// A generation unit started
    UnitStarted { unit: String, output_count: usize },

    /// Processing of an output declaration started
    OutputStarted { unit: String, output: String },

    /// A source was not processed because it is unchanged
    SourceSkipped { output: String, source: String },

    /// A model node produced no file
    NodeSkipped {
        output: String,
        node: String,
        reason: String,
    },

    /// A target file was written
    FileWritten { output: String, path: PathBuf },

    /// A generation unit finished
    UnitCompleted {
        unit: String,
        written_count: usize,
        skipped_count: usize,
    },

    /// A generation unit aborted
    UnitFailed { unit: String, error: String },
}

/// Trait for receiving generation events
///
/// Implementations:
/// - TracingEventSink: events as log lines
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait GenerationEventSink: Send + Sync {
    fn on_event(&self, event: GenerationEvent);

    /// Whether per-file and per-node events are wanted. Unit-level events
    /// are always delivered.
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl GenerationEventSink for NoopEventSink {
    fn on_event(&self, _event: GenerationEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
