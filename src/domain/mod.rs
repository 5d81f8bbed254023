//! Domain Layer
//!
//! The generation model without I/O: names and scopes, the model tree,
//! outlets and mergepoints, checksums and the ports infrastructure plugs into.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (Namespace, QualifiedName, ContentChecksum)
//! - `entities/` - Checksums, model tree, outputs, unit configuration, run state
//! - `services/` - Scoped lookup, node selector, merge markers, change detection
//! - `outlet/` - Outlet trait, registry, execution context, built-in outlets
//! - `ports/` - Interface definitions for infrastructure

pub mod entities;
pub mod outlet;
pub mod ports;
pub mod services;
pub mod value_objects;
