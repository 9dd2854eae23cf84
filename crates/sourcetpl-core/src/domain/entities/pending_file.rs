//! A file queued for writing.

use serde::Serialize;
use std::path::PathBuf;

use super::common::RelativePath;

/// One entry of the [`FileRegistry`](super::registry::FileRegistry).
///
/// Content is split in three optional parts so the selector can fill the
/// comment block, the body and the closing guard independently. Unset parts
/// are skipped when the file is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingFile {
    name: String,
    subdir: RelativePath,
    head: Option<String>,
    body: Option<String>,
    tail: Option<String>,
    executable: bool,
    extension: Option<String>,
    public_header: bool,
}

impl PendingFile {
    pub fn new(name: impl Into<String>, subdir: RelativePath) -> Self {
        Self {
            name: name.into(),
            subdir,
            head: None,
            body: None,
            tail: None,
            executable: false,
            extension: None,
            public_header: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subdir(&self) -> &RelativePath {
        &self.subdir
    }

    pub fn head(&self) -> Option<&str> {
        self.head.as_deref()
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn tail(&self) -> Option<&str> {
        self.tail.as_deref()
    }

    pub const fn is_executable(&self) -> bool {
        self.executable
    }

    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    pub const fn is_public_header(&self) -> bool {
        self.public_header
    }

    // ── Setters ──────────────────────────────────────────────────────────────

    pub fn set_head(&mut self, head: Option<String>) -> &mut Self {
        self.head = head;
        self
    }

    pub fn set_body(&mut self, body: Option<String>) -> &mut Self {
        self.body = body;
        self
    }

    pub fn set_tail(&mut self, tail: Option<String>) -> &mut Self {
        self.tail = tail;
        self
    }

    pub fn set_executable(&mut self, executable: bool) -> &mut Self {
        self.executable = executable;
        self
    }

    /// Set the extension; a missing leading `.` is added.
    pub fn set_extension(&mut self, extension: impl Into<String>) -> &mut Self {
        let ext = extension.into();
        self.extension = if ext.is_empty() {
            None
        } else if ext.starts_with('.') {
            Some(ext)
        } else {
            Some(format!(".{ext}"))
        };
        self
    }

    pub fn set_public_header(&mut self, public: bool) -> &mut Self {
        self.public_header = public;
        self
    }

    // ── Derived ──────────────────────────────────────────────────────────────

    /// The extension-qualified file name.
    ///
    /// The extension is appended unless the name already ends with it, so
    /// `foo` and `foo.c` both resolve to `foo.c`.
    pub fn file_name(&self) -> String {
        qualified_name(&self.name, self.extension.as_deref())
    }

    /// Path of the file relative to the registry root.
    pub fn relative_path(&self) -> PathBuf {
        self.subdir.as_path().join(self.file_name())
    }

    /// Head, body and tail concatenated, skipping unset parts.
    pub fn contents(&self) -> String {
        [&self.head, &self.body, &self.tail]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

/// `name` with `extension` appended unless it already ends with it.
pub fn qualified_name(name: &str, extension: Option<&str>) -> String {
    match extension {
        Some(ext) if !name.ends_with(ext) => format!("{name}{ext}"),
        _ => name.to_string(),
    }
}

/// File name without its extension, `.`/`-` mapped to `_`, uppercased.
///
/// Used for include guards: `foo_def.h` → `FOO_DEF`.
pub fn guard_name(file_name: &str) -> String {
    let stem = match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    };
    stem.replace(['.', '-'], "_").to_uppercase()
}
