//! Domain value objects: Language, ProjectKind, FileRole.
//!
//! These are pure value types: `Copy`, equality-by-value, no identity. Each
//! carries its string representation and a `FromStr` parser; nothing else.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Language ─────────────────────────────────────────────────────────────────

/// A language the generator can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
}

impl Language {
    pub const ALL: &'static [Language] = &[Language::C];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::C => "c",
        }
    }

    pub const fn source_extension(&self) -> &'static str {
        match self {
            Self::C => ".c",
        }
    }

    pub const fn header_extension(&self) -> &'static str {
        match self {
            Self::C => ".h",
        }
    }

    /// Project kinds this language can produce.
    pub const fn supported_kinds(&self) -> &'static [ProjectKind] {
        match self {
            Self::C => ProjectKind::ALL,
        }
    }

    pub fn supports(self, kind: ProjectKind) -> bool {
        self.supported_kinds().contains(&kind)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "c" => Ok(Self::C),
            other => Err(DomainError::UnsupportedLanguage(other.to_string())),
        }
    }
}

// ── ProjectKind ───────────────────────────────────────────────────────────────

/// The unit the generator scaffolds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectKind {
    /// A single source file, no directory tree.
    Source,
    /// A single header file, no directory tree.
    Header,
    Application,
    Library,
}

impl ProjectKind {
    pub const ALL: &'static [ProjectKind] = &[
        ProjectKind::Source,
        ProjectKind::Header,
        ProjectKind::Application,
        ProjectKind::Library,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Header => "header",
            Self::Application => "application",
            Self::Library => "library",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Source => "a single source file",
            Self::Header => "a single header file with include guard",
            Self::Application => "an executable with Makefile and header set",
            Self::Library => "a shared/static library with merged public header",
        }
    }

    /// Source and header requests emit one file and no directory tree.
    pub const fn is_single_file(self) -> bool {
        matches!(self, Self::Source | Self::Header)
    }

    /// Prefix applied to the project name (`lib` for libraries).
    pub const fn name_prefix(self) -> &'static str {
        match self {
            Self::Library => "lib",
            _ => "",
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "source" | "src" => Ok(Self::Source),
            "header" | "hdr" => Ok(Self::Header),
            "application" | "app" => Ok(Self::Application),
            "library" | "lib" => Ok(Self::Library),
            other => Err(DomainError::UnsupportedKind(other.to_string())),
        }
    }
}

// ── FileRole ──────────────────────────────────────────────────────────────────

/// The part a template plays in a generated project.
///
/// A role is the catalog key together with the language and the packaging
/// flag. The kebab-case name doubles as the file stem of on-disk overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileRole {
    Comment,
    SingleComment,
    HeaderGuardOpen,
    HeaderGuardClose,
    MainSource,
    MainHeader,
    DefHeader,
    LibHeader,
    LibSymbols,
    UtilsSource,
    UtilsHeader,
    ErrorSource,
    ErrorHeader,
    AppMakefile,
    LibMakefile,
    DebianScript,
    BuildPackage,
    CleanPackage,
    Cron,
    InitScript,
    PackageConf,
    GitIgnore,
    Readme,
}

impl FileRole {
    pub const ALL: &'static [FileRole] = &[
        FileRole::Comment,
        FileRole::SingleComment,
        FileRole::HeaderGuardOpen,
        FileRole::HeaderGuardClose,
        FileRole::MainSource,
        FileRole::MainHeader,
        FileRole::DefHeader,
        FileRole::LibHeader,
        FileRole::LibSymbols,
        FileRole::UtilsSource,
        FileRole::UtilsHeader,
        FileRole::ErrorSource,
        FileRole::ErrorHeader,
        FileRole::AppMakefile,
        FileRole::LibMakefile,
        FileRole::DebianScript,
        FileRole::BuildPackage,
        FileRole::CleanPackage,
        FileRole::Cron,
        FileRole::InitScript,
        FileRole::PackageConf,
        FileRole::GitIgnore,
        FileRole::Readme,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::SingleComment => "single-comment",
            Self::HeaderGuardOpen => "header-guard-open",
            Self::HeaderGuardClose => "header-guard-close",
            Self::MainSource => "main-source",
            Self::MainHeader => "main-header",
            Self::DefHeader => "def-header",
            Self::LibHeader => "lib-header",
            Self::LibSymbols => "lib-symbols",
            Self::UtilsSource => "utils-source",
            Self::UtilsHeader => "utils-header",
            Self::ErrorSource => "error-source",
            Self::ErrorHeader => "error-header",
            Self::AppMakefile => "app-makefile",
            Self::LibMakefile => "lib-makefile",
            Self::DebianScript => "debian-script",
            Self::BuildPackage => "build-package",
            Self::CleanPackage => "clean-package",
            Self::Cron => "cron",
            Self::InitScript => "init-script",
            Self::PackageConf => "package-conf",
            Self::GitIgnore => "gitignore",
            Self::Readme => "readme",
        }
    }
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == wanted)
            .ok_or_else(|| DomainError::NoMatchingTemplate {
                language: "any".into(),
                role: s.to_string(),
            })
    }
}
