//! Domain Entities
//!
//! - `Checksums` - persisted source-change state
//! - `ModelNode` / `ModelPath` - the source model tree and positions in it
//! - `Source` - one source document with its change metadata
//! - `Output` / `UnitConfiguration` - what a generation unit produces
//! - `ControllerState` - mutable state of one run

mod checksums;
mod component;
mod controller_state;
mod model;
mod output;
mod source;
mod unit;

pub use checksums::{source_change_key, truncate_to_millis, Checksums};
pub use component::{ComponentSpec, ParamValue, Params, SourceSpec};
pub use controller_state::{ControllerState, OutletFrame};
pub use model::{ModelNode, ModelPath};
pub use output::{FilenameSource, Output, DEFAULT_EXISTING_TARGET_STRATEGY, DEFAULT_OUTPUT_DIR_KEY};
pub use source::Source;
pub use unit::{UnitConfiguration, DEFAULT_CHECKSUMS_FILE};
