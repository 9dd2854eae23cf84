//! User template overrides layered over the builtin catalog.
//!
//! # Directory layout expected
//!
//! ```text
//! templates/
//! └── c/
//!     ├── comment.tpl                 ← replaces the project comment block
//!     ├── single-comment.tpl          ← comment block of single files
//!     ├── app-makefile.tpl
//!     └── app-makefile.packaged.tpl   ← packaged variant only
//! ```
//!
//! File stems are role names as printed by `source-tpl list --roles`.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use sourcetpl_core::{
    application::{ApplicationError, ports::TemplateCatalog},
    domain::{FileRole, Language},
    error::SourceTplResult,
};

use super::BuiltinCatalog;

pub const OVERRIDE_EXTENSION: &str = "tpl";
pub const PACKAGED_SUFFIX: &str = ".packaged";

/// Builtin templates with per-role overrides read from disk.
#[derive(Debug, Clone)]
pub struct OverlayCatalog {
    builtin: BuiltinCatalog,
    overrides: HashMap<(Language, FileRole, bool), String>,
    source: PathBuf,
}

impl OverlayCatalog {
    /// Read every override under `dir`.
    ///
    /// # Errors
    ///
    /// `ApplicationError::CatalogError` when `dir` is missing or cannot be
    /// walked, or an override file cannot be read. Files whose language
    /// directory or role name is unknown are skipped with a `WARN` log.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn load(dir: impl AsRef<Path>) -> SourceTplResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(catalog_error(dir, "template directory not found"));
        }

        let mut overrides = HashMap::new();

        for entry in WalkDir::new(dir).min_depth(2).max_depth(2).sort_by_file_name() {
            let entry = entry.map_err(|e| catalog_error(dir, &e.to_string()))?;
            let path = entry.path();

            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(OVERRIDE_EXTENSION)
            {
                continue;
            }

            let Some((language, role, packaged)) = parse_override_path(path) else {
                warn!(path = %path.display(), "skipping unrecognised template override");
                continue;
            };

            let text = fs::read_to_string(path).map_err(|e| catalog_error(path, &e.to_string()))?;
            debug!(%language, %role, packaged, "loaded template override");
            overrides.insert((language, role, packaged), text);
        }

        info!(count = overrides.len(), "template overrides loaded");
        Ok(Self {
            builtin: BuiltinCatalog::new(),
            overrides,
            source: dir.to_path_buf(),
        })
    }

    /// Number of overrides read from disk.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn is_overridden(&self, language: Language, role: FileRole, packaged: bool) -> bool {
        self.overrides.contains_key(&(language, role, packaged))
    }

    fn lookup_exact(&self, language: Language, role: FileRole, packaged: bool) -> Option<&str> {
        self.overrides
            .get(&(language, role, packaged))
            .map(String::as_str)
            .or_else(|| self.builtin.lookup_exact(language, role, packaged))
    }
}

impl TemplateCatalog for OverlayCatalog {
    fn lookup(&self, language: Language, role: FileRole, packaged: bool) -> Option<&str> {
        if packaged {
            if let Some(text) = self.lookup_exact(language, role, true) {
                return Some(text);
            }
        }
        self.lookup_exact(language, role, false)
    }
}

/// `<dir>/<language>/<role>[.packaged].tpl` → key.
fn parse_override_path(path: &Path) -> Option<(Language, FileRole, bool)> {
    let language = path.parent()?.file_name()?.to_str()?.parse().ok()?;
    let stem = path.file_stem()?.to_str()?;
    let (role, packaged) = match stem.strip_suffix(PACKAGED_SUFFIX) {
        Some(role) => (role, true),
        None => (stem, false),
    };
    Some((language, role.parse().ok()?, packaged))
}

fn catalog_error(path: &Path, reason: &str) -> sourcetpl_core::error::SourceTplError {
    ApplicationError::CatalogError {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
    .into()
}
