//! Command implementations

mod check;
mod generate;

use std::io::Write;

pub use check::cmd_check;
pub use generate::cmd_generate;

/// Write one NDJSON line to stdout.
fn write_event(value: &serde_json::Value) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer(&mut out, value)?;
    writeln!(out)
}
