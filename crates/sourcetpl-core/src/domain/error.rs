// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports keep a copy)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Unsupported language '{0}'")]
    UnsupportedLanguage(String),

    #[error("Unsupported project kind '{0}'")]
    UnsupportedKind(String),

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes the project root: {path}")]
    PathEscapesRoot { path: String },

    #[error("File entry has an empty name")]
    EmptyFileName,

    #[error("Duplicate path in project: {path}")]
    DuplicatePath { path: String },

    #[error("Option '{option}' is not available for {kind} requests")]
    UnsupportedOption { option: &'static str, kind: String },

    // ========================================================================
    // Compatibility Errors
    // ========================================================================
    #[error("language '{language}' does not support kind '{kind}'")]
    IncompatibleLanguageKind { language: String, kind: String },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("No {language} template for '{role}'")]
    NoMatchingTemplate { language: String, role: String },

    #[error("No pending file named '{0}'")]
    UnknownFile(String),

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { .. } => vec![
                "Use letters, digits, '-' and '_' only".into(),
                "Examples: foo, my-app, net_utils".into(),
            ],
            Self::UnsupportedLanguage(_) | Self::IncompatibleLanguageKind { .. } => vec![
                "Only C projects are generated at the moment".into(),
                "Try: source-tpl list".into(),
            ],
            Self::UnsupportedKind(_) => vec![
                "Valid kinds: source, header, application, library".into(),
            ],
            Self::NoMatchingTemplate { role, .. } => vec![
                format!("The template catalog has no entry for '{}'", role),
                "Check the files in your template override directory".into(),
            ],
            Self::UnsupportedOption { option, .. } => vec![
                format!("'{}' only applies to application and library projects", option),
                "Drop the flag or pick --kind application/library".into(),
            ],
            Self::MissingRequiredField { field } => {
                vec![format!("Provide a value for '{}'", field)]
            }
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. }
            | Self::UnsupportedLanguage(_)
            | Self::UnsupportedKind(_)
            | Self::AbsolutePathNotAllowed { .. }
            | Self::PathEscapesRoot { .. }
            | Self::EmptyFileName
            | Self::DuplicatePath { .. }
            | Self::UnsupportedOption { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::IncompatibleLanguageKind { .. } => ErrorCategory::Compatibility,
            Self::NoMatchingTemplate { .. } => ErrorCategory::NotFound,
            Self::UnknownFile(_) => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}
