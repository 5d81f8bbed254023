//! Generate Options

/// Logging configuration handed to the controller at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogSettings {
    /// 0 quiet, 1 info, 2 debug, 3 trace
    pub verbosity: u8,
    /// Deliver per-file and per-node events to the event sink
    pub detailed_events: bool,
}

impl LogSettings {
    pub fn from_verbosity(verbosity: u8) -> Self {
        Self {
            verbosity,
            detailed_events: verbosity > 0,
        }
    }

    pub fn with_detailed_events(mut self, detailed: bool) -> Self {
        self.detailed_events = detailed;
        self
    }

    /// Log every outlet invocation
    pub fn traces_outlets(&self) -> bool {
        self.verbosity >= 3
    }
}
