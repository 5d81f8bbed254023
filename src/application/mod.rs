//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `Controller` - Runs generation units (sources, outlets, strategies, checksums)

pub mod generate;

pub use generate::{validate_unit, Controller, GenerationReport, LogSettings, UnitReport};
