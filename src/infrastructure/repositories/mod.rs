//! Repository Implementations
//!
//! Concrete implementations of repository ports.

mod checksums_file;

pub use checksums_file::{format_checksums, parse_checksums, TextChecksumsRepository};
