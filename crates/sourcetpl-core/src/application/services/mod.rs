//! Application services - orchestrate use cases.
//!
//! The selector turns a request into a registry; the scaffold service
//! checks the target and flushes that registry through the filesystem port.

pub mod scaffold_service;
pub mod selector;

pub use scaffold_service::{ScaffoldReport, ScaffoldService};
pub use selector::TemplateSelector;
