//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod checksum;
mod config_warning;
mod encoding;
mod line_break;
mod namespace;
mod variable_scope;

pub use checksum::{ContentChecksum, InvalidHexError};
pub use config_warning::ConfigWarning;
pub use encoding::{Encoding, EncodingError};
pub use line_break::{LineBreak, LineBreakPolicy, Lines};
pub use namespace::{InvalidNameError, Namespace, QualifiedName, SEPARATOR};
pub use variable_scope::VariableScope;
