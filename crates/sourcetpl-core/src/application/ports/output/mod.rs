//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `sourcetpl-adapters` crate provides implementations.

use crate::domain::{FileRole, Language};
use crate::error::SourceTplResult;
use std::path::Path;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `sourcetpl_adapters::filesystem::LocalFilesystem` (production)
/// - `sourcetpl_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SourceTplResult<()>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> SourceTplResult<()>;

    /// Add (or remove) the execute permission.
    fn set_permissions(&self, path: &Path, executable: bool) -> SourceTplResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for template lookup.
///
/// Implemented by:
/// - `sourcetpl_adapters::catalog::BuiltinCatalog` (compiled-in tables)
/// - `sourcetpl_adapters::catalog::OverlayCatalog` (user overrides on top)
pub trait TemplateCatalog: Send + Sync {
    /// Template text for a role.
    ///
    /// `packaged` selects the packaging variant when the catalog has one;
    /// implementations fall back to the plain variant otherwise.
    fn lookup(&self, language: Language, role: FileRole, packaged: bool) -> Option<&str>;
}
