//! The `ProjectRequest` aggregate and its builder.
//!
//! A `ProjectRequest` is the validated description of what the user asked
//! for. Every derived name (root directory, project name, binary name) is
//! computed from it, so the selector never looks at raw user input.
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Observability is the responsibility
//! of the application and CLI layers, not the domain.

use chrono::{Local, NaiveDateTime};
use std::fmt;
use std::path::PathBuf;

use crate::domain::{
    error::DomainError,
    value_objects::{Language, ProjectKind},
};

pub const DEFAULT_COMPILER: &str = "gcc";
pub const DEFAULT_AUTHOR: &str = "unknown";

/// Line separator accepted in content overrides.
pub const CONTENT_LINE_SEPARATOR: char = '^';

// ── Aggregate root ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRequest {
    name: String,
    kind: ProjectKind,
    language: Language,
    packaged: bool,
    git: bool,
    author: String,
    compiler: String,
    content: Option<String>,
    sources: Vec<String>,
    headers: Vec<String>,
    timestamp: NaiveDateTime,
}

impl ProjectRequest {
    pub fn builder(name: impl Into<String>) -> ProjectRequestBuilder {
        ProjectRequestBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub const fn kind(&self) -> ProjectKind {
        self.kind
    }
    pub const fn language(&self) -> Language {
        self.language
    }
    pub const fn is_packaged(&self) -> bool {
        self.packaged
    }
    pub const fn with_git(&self) -> bool {
        self.git
    }
    pub fn author(&self) -> &str {
        &self.author
    }
    pub fn compiler(&self) -> &str {
        &self.compiler
    }
    /// Content override with `^` already turned into newlines.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
    pub fn sources(&self) -> &[String] {
        &self.sources
    }
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
    pub const fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Name without a `lib` prefix the user may have typed for a library.
    fn base_name(&self) -> &str {
        match self.kind {
            ProjectKind::Library => self
                .name
                .strip_prefix("lib")
                .filter(|rest| !rest.is_empty())
                .unwrap_or(&self.name),
            _ => &self.name,
        }
    }

    /// Library API prefix: `foo` for `libfoo`.
    pub fn lib_prefix(&self) -> String {
        self.base_name().replace('-', "_").to_lowercase()
    }

    /// Identifier-safe project name: `lib` prefix for libraries, `-` → `_`.
    pub fn project_name(&self) -> String {
        format!(
            "{}{}",
            self.kind.name_prefix(),
            self.base_name().replace('-', "_")
        )
    }

    /// Binary/directory-safe project name: `lib` prefix for libraries, `_` → `-`.
    pub fn bin_name(&self) -> String {
        format!(
            "{}{}",
            self.kind.name_prefix(),
            self.base_name().replace('_', "-")
        )
    }

    /// Directory holding the project sources, relative to the output directory.
    ///
    /// `None` for single-file requests, which write straight into the output
    /// directory.
    pub fn project_dir(&self) -> Option<PathBuf> {
        match self.kind {
            ProjectKind::Source | ProjectKind::Header => None,
            ProjectKind::Application => Some(PathBuf::from(format!("{}-app", self.bin_name()))),
            ProjectKind::Library => Some(PathBuf::from(self.bin_name())),
        }
    }

    /// Top-level directory created by the request.
    ///
    /// Packaged projects nest the project directory under `package-<dir>`.
    pub fn root_dir(&self) -> Option<PathBuf> {
        let dir = self.project_dir()?;
        if self.packaged {
            Some(PathBuf::from(format!("package-{}", dir.display())))
        } else {
            Some(dir)
        }
    }
}

impl fmt::Display for ProjectRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} '{}'", self.language, self.kind, self.name)?;
        if self.packaged {
            f.write_str(" (packaged)")?;
        }
        Ok(())
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ProjectRequestBuilder {
    name: String,
    kind: ProjectKind,
    language: Language,
    packaged: bool,
    git: bool,
    author: Option<String>,
    compiler: Option<String>,
    content: Option<String>,
    sources: Vec<String>,
    headers: Vec<String>,
    timestamp: Option<NaiveDateTime>,
}

impl ProjectRequestBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ProjectKind::Application,
            language: Language::C,
            packaged: false,
            git: false,
            author: None,
            compiler: None,
            content: None,
            sources: Vec::new(),
            headers: Vec::new(),
            timestamp: None,
        }
    }

    pub fn kind(mut self, kind: ProjectKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn packaged(mut self, packaged: bool) -> Self {
        self.packaged = packaged;
        self
    }

    pub fn git(mut self, git: bool) -> Self {
        self.git = git;
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn compiler(mut self, compiler: impl Into<String>) -> Self {
        self.compiler = Some(compiler.into());
        self
    }

    /// Raw content override; `^` separates lines.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Fix the creation timestamp instead of reading the clock.
    pub fn timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn build(self) -> Result<ProjectRequest, DomainError> {
        validate_name(&self.name, self.kind)?;

        if !self.language.supports(self.kind) {
            return Err(DomainError::IncompatibleLanguageKind {
                language: self.language.to_string(),
                kind: self.kind.to_string(),
            });
        }

        if self.kind.is_single_file() {
            let rejected = [
                ("package", self.packaged),
                ("git", self.git),
                ("sources", !self.sources.is_empty()),
                ("headers", !self.headers.is_empty()),
            ];
            if let Some((option, _)) = rejected.into_iter().find(|(_, set)| *set) {
                return Err(DomainError::UnsupportedOption {
                    option,
                    kind: self.kind.to_string(),
                });
            }
        }

        for extra in self.sources.iter().chain(&self.headers) {
            validate_name(extra, ProjectKind::Source)?;
        }

        let author = self
            .author
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

        let compiler = self
            .compiler
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COMPILER.to_string());

        Ok(ProjectRequest {
            name: self.name,
            kind: self.kind,
            language: self.language,
            packaged: self.packaged,
            git: self.git,
            author,
            compiler,
            content: self
                .content
                .map(|c| c.replace(CONTENT_LINE_SEPARATOR, "\n")),
            sources: self.sources,
            headers: self.headers,
            timestamp: self
                .timestamp
                .unwrap_or_else(|| Local::now().naive_local()),
        })
    }
}

/// Validate a user-supplied project or file name.
///
/// Dots are only accepted for single files (`foo.c`), where the extension
/// may already be part of the name.
pub fn validate_name(name: &str, kind: ProjectKind) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidProjectName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if name.starts_with('.') || name.starts_with('-') {
        return Err(invalid("name cannot start with '.' or '-'"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid("name cannot contain path separators"));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
    {
        return Err(invalid(&format!("character '{bad}' is not allowed")));
    }
    if name.contains('.') && !kind.is_single_file() {
        return Err(invalid("project names cannot contain '.'"));
    }
    Ok(())
}
