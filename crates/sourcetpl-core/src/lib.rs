//! sourcetpl-core - domain and application layers of `source-tpl`.
//!
//! `source-tpl` generates boilerplate for C: single source or header files,
//! application trees and library trees, optionally wrapped in a packaging
//! layout and with git housekeeping files.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          sourcetpl-cli (CLI)            │
//! │     parses flags, builds requests       │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (TemplateSelector, ScaffoldService)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │     (TemplateCatalog, Filesystem)       │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    sourcetpl-adapters (Infrastructure)  │
//! │ (BuiltinCatalog, OverlayCatalog,        │
//! │  LocalFilesystem, MemoryFilesystem)     │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ProjectRequest, FileRegistry,          │
//! │  PendingFile, RenderContext)            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sourcetpl_adapters::{BuiltinCatalog, LocalFilesystem};
//! use sourcetpl_core::prelude::*;
//!
//! let request = ProjectRequest::builder("foo")
//!     .kind(ProjectKind::Library)
//!     .headers(["net"])
//!     .build()?;
//!
//! let service = ScaffoldService::new(
//!     Box::new(BuiltinCatalog::new()),
//!     Box::new(LocalFilesystem::new()),
//! );
//! service.scaffold(&request, ".")?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ScaffoldReport, ScaffoldService, TemplateSelector,
        ports::{Filesystem, TemplateCatalog},
    };
    pub use crate::domain::{
        FileRegistry, FileRole, Language, PendingFile, ProjectKind, ProjectRequest,
        ProjectRequestBuilder, RenderContext,
    };
    pub use crate::error::{SourceTplError, SourceTplResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
