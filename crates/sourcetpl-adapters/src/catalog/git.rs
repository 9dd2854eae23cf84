//! Builtin git housekeeping templates.

use sourcetpl_core::domain::FileRole;

use super::Entry;

const README: &str = "# {{PROJECT_NAME}}\nA brief description of the project.\n\n";

pub(super) const TEMPLATES: &[Entry] = &[(FileRole::Readme, false, README)];
