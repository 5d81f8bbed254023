//! Log-line event sink

use crate::domain::ports::{GenerationEvent, GenerationEventSink};

/// Reports generation progress through `tracing`
pub struct TracingEventSink {
    detailed: bool,
}

impl TracingEventSink {
    pub fn new(detailed: bool) -> Self {
        Self { detailed }
    }
}

impl GenerationEventSink for TracingEventSink {
    fn on_event(&self, event: GenerationEvent) {
        match event {
            GenerationEvent::UnitStarted { unit, output_count } => {
                tracing::info!(unit = %unit, outputs = output_count, "generating");
            }
            GenerationEvent::OutputStarted { unit, output } => {
                tracing::debug!(unit = %unit, output = %output, "output started");
            }
            GenerationEvent::SourceSkipped { output, source } => {
                tracing::info!(output = %output, source = %source, "source unchanged, skipped");
            }
            GenerationEvent::NodeSkipped {
                output,
                node,
                reason,
            } => {
                tracing::debug!(output = %output, node = %node, reason = %reason, "node skipped");
            }
            GenerationEvent::FileWritten { output, path } => {
                tracing::info!(output = %output, path = %path.display(), "written");
            }
            GenerationEvent::UnitCompleted {
                unit,
                written_count,
                skipped_count,
            } => {
                tracing::info!(
                    unit = %unit,
                    written = written_count,
                    skipped = skipped_count,
                    "unit complete"
                );
            }
            GenerationEvent::UnitFailed { unit, error } => {
                tracing::error!(unit = %unit, "unit failed: {error}");
            }
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.detailed
    }
}
