//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use sourcetpl_core::{
    application::{ApplicationError, ports::Filesystem},
    error::SourceTplResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same state, so a test can hand one clone to the
/// service and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    executables: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> SourceTplResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| {
            ApplicationError::LockPoisoned {
                name: "memory filesystem",
            }
            .into()
        })
    }

    fn write(&self) -> SourceTplResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| {
            ApplicationError::LockPoisoned {
                name: "memory filesystem",
            }
            .into()
        })
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.read().ok()?.files.get(path.as_ref()).cloned()
    }

    /// Check if a file is marked executable.
    pub fn is_executable(&self, path: impl AsRef<Path>) -> bool {
        self.read()
            .map(|inner| inner.executables.contains(path.as_ref()))
            .unwrap_or(false)
    }

    /// All files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// All directories (including implied parents), sorted.
    pub fn list_dirs(&self) -> Vec<PathBuf> {
        self.read()
            .map(|inner| inner.directories.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> SourceTplResult<()> {
        let mut inner = self.write()?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> SourceTplResult<()> {
        let mut inner = self.write()?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> SourceTplResult<()> {
        let mut inner = self.write()?;

        if !inner.files.contains_key(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            }
            .into());
        }

        if executable {
            inner.executables.insert(path.to_path_buf());
        } else {
            inner.executables.remove(path);
        }

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }
}
