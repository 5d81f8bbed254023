//! Generate Module
//!
//! Runs generation units: sources are read, model nodes selected, outlets
//! executed and the results handed to existing-target strategies.
//!
//! ## Structure
//!
//! - `options` - Logging settings (`LogSettings`)
//! - `result` - Run summary (`GenerationReport`, `UnitReport`)
//! - `components` - Per-output component resolution and unit validation
//! - `controller` - The pipeline itself (`Controller`)
//!
//! ## Usage
//!
//! ```ignore
//! use weaver::application::generate::{Controller, LogSettings};
//!
//! let mut controller = Controller::new(factory, fs, checksums, LogSettings::default());
//! let report = controller.run(&mut units)?;
//! ```

mod components;
mod controller;
mod options;
mod result;

pub use components::{validate_unit, OutputComponents};
pub use controller::Controller;
pub use options::LogSettings;
pub use result::{GenerationReport, UnitReport};

#[cfg(test)]
mod tests;
