//! Unit file configuration
//!
//! Precedence, highest first:
//! 1. CLI flags
//! 2. Environment variables (WEAVER_*)
//! 3. The unit file (weaver.toml)
//! 4. Built-in defaults

mod build;
mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use build::{build_unit, load_unit};
pub use loader::{
    env_overrides, load_with_warnings, overrides_from, parse_with_warnings, ENV_CACHE_DIR,
    ENV_RUN_ONLY_ON_SOURCE_CHANGE,
};
pub use types::{
    MergepointSection, OutletSection, OutputSection, Overrides, SourceSection, UnitFile,
    UnitSection, DEFAULT_UNIT_FILE,
};
