//! JSON Event Sink
//!
//! Outputs generation events as NDJSON for CI/automation consumption.

use crate::domain::ports::{GenerationEvent, GenerationEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that writes one JSON object per line
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl GenerationEventSink for JsonEventSink {
    fn on_event(&self, event: GenerationEvent) {
        let json = match event {
            GenerationEvent::UnitStarted { unit, output_count } => serde_json::json!({
                "event": "unit_start",
                "unit": unit,
                "output_count": output_count,
            }),

            GenerationEvent::OutputStarted { unit, output } => serde_json::json!({
                "event": "output_start",
                "unit": unit,
                "output": output,
            }),

            GenerationEvent::SourceSkipped { output, source } => serde_json::json!({
                "event": "source_skipped",
                "output": output,
                "source": source,
            }),

            GenerationEvent::NodeSkipped {
                output,
                node,
                reason,
            } => serde_json::json!({
                "event": "node_skipped",
                "output": output,
                "node": node,
                "reason": reason,
            }),

            GenerationEvent::FileWritten { output, path } => serde_json::json!({
                "event": "file_written",
                "output": output,
                "path": path.display().to_string(),
            }),

            GenerationEvent::UnitCompleted {
                unit,
                written_count,
                skipped_count,
            } => serde_json::json!({
                "event": "unit_complete",
                "status": "success",
                "unit": unit,
                "written": written_count,
                "skipped": skipped_count,
            }),

            GenerationEvent::UnitFailed { unit, error } => serde_json::json!({
                "event": "unit_complete",
                "status": "failed",
                "unit": unit,
                "error": error,
            }),
        };

        self.write_event(json);
    }
}
