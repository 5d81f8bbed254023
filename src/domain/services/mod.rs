//! Domain Services
//!
//! Pure logic over domain entities: scoped name lookup, the node selector,
//! user-region merging and the incremental-build decision. No I/O here.

mod merge_markers;
mod options;
mod scoped_store;
mod selector;
mod source_change;
mod variables;

pub use merge_markers::{merge_user_regions, user_regions, MarkerError, BEGIN_MARKER, END_MARKER};
pub use options::Options;
pub use scoped_store::ScopedStore;
pub use selector::Selector;
pub use source_change::{check_source_modified, SourceChangeTracker};
pub use variables::{Variable, VariableStore};
