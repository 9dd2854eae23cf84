//! Unified error handling for sourcetpl-core.
//!
//! Wraps domain and application errors behind one type so callers get a
//! single `suggestions()`/`category()` surface.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for sourcetpl-core operations.
#[derive(Debug, Error, Clone)]
pub enum SourceTplError {
    /// Errors from the domain layer (invalid requests, missing templates).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (filesystem, catalog loading).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl SourceTplError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { .. } => vec![
                "Run `source-tpl config path` to locate the configuration file".into(),
                "Run `source-tpl init --force` to regenerate it".into(),
            ],
            Self::Internal { .. } => vec![
                "Please report this issue at: https://github.com/rsfreitas/source-template/issues"
                    .into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Compatibility => ErrorCategory::Compatibility,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type SourceTplResult<T> = Result<T, SourceTplError>;
