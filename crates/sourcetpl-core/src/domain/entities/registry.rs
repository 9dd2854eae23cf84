//! The in-memory set of files queued for writing.
//!
//! The registry is populated by the template selector and drained by the
//! scaffold service's flush pass. Entries are keyed by name; registering a
//! name twice replaces the earlier record and moves it to the end, so
//! iteration order is always the order in which surviving records were added.

use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::common::RelativePath;
use super::pending_file::PendingFile;
use crate::domain::error::DomainError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileRegistry {
    root: PathBuf,
    directories: Vec<RelativePath>,
    files: IndexMap<String, PendingFile>,
}

impl FileRegistry {
    /// Create an empty registry whose paths are relative to `root`.
    ///
    /// An empty `root` means files land directly in the output directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            directories: Vec::new(),
            files: IndexMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store a pending file, replacing any earlier record with the same name.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        head: Option<String>,
        body: Option<String>,
        tail: Option<String>,
        executable: bool,
    ) -> Result<&mut PendingFile, DomainError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::EmptyFileName);
        }
        RelativePath::try_new(name.as_str())?;

        let mut file = PendingFile::new(name.clone(), RelativePath::try_new(path)?);
        file.set_head(head)
            .set_body(body)
            .set_tail(tail)
            .set_executable(executable);

        self.files.shift_remove(&name);
        let (index, _) = self.files.insert_full(name, file);
        Ok(&mut self.files[index])
    }

    /// Record a directory of the tree. Duplicates are ignored.
    pub fn add_directory(&mut self, path: impl Into<PathBuf>) -> Result<(), DomainError> {
        let dir = RelativePath::try_new(path)?;
        if !self.directories.contains(&dir) {
            self.directories.push(dir);
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&PendingFile> {
        self.files.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut PendingFile, DomainError> {
        self.files
            .get_mut(name)
            .ok_or_else(|| DomainError::UnknownFile(name.to_string()))
    }

    // ── Property setters ─────────────────────────────────────────────────────

    pub fn set_extension(&mut self, name: &str, extension: &str) -> Result<(), DomainError> {
        self.get_mut(name)?.set_extension(extension);
        Ok(())
    }

    pub fn set_executable(&mut self, name: &str, executable: bool) -> Result<(), DomainError> {
        self.get_mut(name)?.set_executable(executable);
        Ok(())
    }

    pub fn set_body(&mut self, name: &str, body: Option<String>) -> Result<(), DomainError> {
        self.get_mut(name)?.set_body(body);
        Ok(())
    }

    pub fn mark_public_header(&mut self, name: &str) -> Result<(), DomainError> {
        self.get_mut(name)?.set_public_header(true);
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    /// Files in registration order.
    pub fn files(&self) -> impl Iterator<Item = &PendingFile> {
        self.files.values()
    }

    pub fn directories(&self) -> &[RelativePath] {
        &self.directories
    }

    /// Files flagged as public headers, in registration order.
    pub fn public_headers(&self) -> impl Iterator<Item = &PendingFile> {
        self.files.values().filter(|f| f.is_public_header())
    }

    /// One `#include "<file>"` line per public header.
    pub fn public_header_includes(&self) -> String {
        self.public_headers()
            .map(|f| format!("#include \"{}\"\n", f.file_name()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Check that no two records resolve to the same path on disk.
    ///
    /// Names are unique by construction, but `foo` and `foo.c` with the same
    /// extension and directory collapse onto one file.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = std::collections::HashSet::new();
        for file in self.files.values() {
            let path = file.relative_path();
            if !seen.insert(path.clone()) {
                return Err(DomainError::DuplicatePath {
                    path: path.display().to_string(),
                });
            }
        }
        Ok(())
    }
}
