//! Application layer for source-tpl.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (TemplateSelector, ScaffoldService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer and owns every side
//! effect the core performs, always through a port.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{ScaffoldReport, ScaffoldService, TemplateSelector};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, TemplateCatalog};

pub use error::ApplicationError;
