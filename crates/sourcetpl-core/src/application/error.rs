//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Project (or single file) already exists at the target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// A template override directory could not be loaded.
    #[error("Template catalog error at {path}: {reason}")]
    CatalogError { path: PathBuf, reason: String },

    /// Shared adapter state is unusable (lock poisoned).
    #[error("Adapter state is poisoned: {name}")]
    LockPoisoned { name: &'static str },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Files written before the failure are left in place".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Already exists: {}", path.display()),
                "Use --force to write into it anyway".into(),
                "Choose a different project name".into(),
            ],
            Self::CatalogError { path, .. } => vec![
                format!("Check the template directory: {}", path.display()),
                "Override files are named <language>/<role>[.packaged].tpl".into(),
                "Run `source-tpl list --roles` to see valid role names".into(),
            ],
            Self::LockPoisoned { .. } => vec!["Try again".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::LockPoisoned { .. } => ErrorCategory::Internal,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::CatalogError { .. } => ErrorCategory::Configuration,
        }
    }
}
