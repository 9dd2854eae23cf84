//! Template catalog adapters.
//!
//! [`BuiltinCatalog`] serves the compiled-in tables. [`OverlayCatalog`] puts
//! a directory of user templates on top of it.

mod builtin;
mod c;
mod git;
mod overlay;
mod package;

pub use builtin::BuiltinCatalog;
pub use overlay::{OVERRIDE_EXTENSION, OverlayCatalog, PACKAGED_SUFFIX};

use sourcetpl_core::domain::FileRole;

/// `(role, packaged variant, template text)`.
type Entry = (FileRole, bool, &'static str);
