//! Infrastructure adapters for source-tpl.
//!
//! This crate implements the ports defined in `sourcetpl-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod catalog;
pub mod filesystem;

// Re-export commonly used adapters
pub use catalog::{BuiltinCatalog, OverlayCatalog};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
