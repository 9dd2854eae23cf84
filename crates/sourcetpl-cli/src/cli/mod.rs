//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "source-tpl",
    bin_name = "source-tpl",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Boilerplate generator for C projects",
    long_about = "source-tpl writes the skeleton of a C source file, header, \
                  application or library: sources, headers, Makefile and, \
                  optionally, Debian packaging scripts.",
    after_help = "EXAMPLES:\n\
        \x20 source-tpl new foo                      # foo-app/ with src/, include/, Makefile\n\
        \x20 source-tpl new net-utils -t library     # libnet-utils/\n\
        \x20 source-tpl new foo -p --git             # package-foo-app/ with Debian scripts\n\
        \x20 source-tpl new parser -t source\n\
        \x20 source-tpl completions bash > /usr/share/bash-completion/completions/source-tpl",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a source file, header, application or library.
    #[command(
        visible_alias = "n",
        about = "Generate a new file or project",
        after_help = "EXAMPLES:\n\
            \x20 source-tpl new foo --sources 'parser,lexer' --headers config\n\
            \x20 source-tpl new foo -t header -c 'int foo(void);^'\n\
            \x20 source-tpl new mylib -t lib -p -a 'Jane Doe' --compiler clang"
    )]
    New(NewArgs),

    /// List project kinds or template roles.
    #[command(
        visible_alias = "ls",
        about = "List project kinds and the files they produce",
        after_help = "EXAMPLES:\n\
            \x20 source-tpl list\n\
            \x20 source-tpl list --roles\n\
            \x20 source-tpl list --format json"
    )]
    List(ListArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 source-tpl init\n\
            \x20 source-tpl init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 source-tpl completions bash > ~/.local/share/bash-completion/completions/source-tpl\n\
            \x20 source-tpl completions zsh  > ~/.zfunc/_source-tpl\n\
            \x20 source-tpl completions fish > ~/.config/fish/completions/source-tpl.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 source-tpl config get defaults.author\n\
            \x20 source-tpl config set defaults.compiler clang\n\
            \x20 source-tpl config list"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `source-tpl new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// File or project name. Single files may carry their extension.
    #[arg(value_name = "NAME", help = "File or project name")]
    pub name: String,

    /// What to generate. Falls back to `defaults.kind`, then `application`.
    #[arg(
        short = 't',
        long = "type",
        value_name = "KIND",
        value_enum,
        help = "What to generate"
    )]
    pub kind: Option<ProjectKind>,

    /// Target language. Falls back to `defaults.language`, then `c`.
    #[arg(
        short = 'l',
        long = "lang",
        value_name = "LANGUAGE",
        value_enum,
        help = "Target language"
    )]
    pub language: Option<Language>,

    /// Wrap the project in a Debian packaging tree.
    #[arg(short = 'p', long = "package", help = "Add Debian packaging files")]
    pub package: bool,

    /// Add `.gitignore` and `README.md`.
    #[arg(long = "git", help = "Add .gitignore and README.md")]
    pub git: bool,

    /// Body for a single file, or for the extra sources/headers. `^` starts a
    /// new line.
    #[arg(
        short = 'c',
        long = "content",
        value_name = "TEXT",
        allow_hyphen_values = true,
        help = "File body ('^' for newline)"
    )]
    pub content: Option<String>,

    /// Extra source files, separated by `;`, `,`, `|` or spaces.
    #[arg(long = "sources", value_name = "LIST", help = "Extra source files")]
    pub sources: Option<String>,

    /// Extra header files, separated by `;`, `,`, `|` or spaces.
    #[arg(long = "headers", value_name = "LIST", help = "Extra header files")]
    pub headers: Option<String>,

    /// Author written in file comments.
    #[arg(
        short = 'a',
        long = "author",
        value_name = "NAME",
        help = "Author name (default: config, then git user.name)"
    )]
    pub author: Option<String>,

    /// Compiler placed in the Makefile.
    #[arg(long = "compiler", value_name = "CC", help = "Compiler for the Makefile")]
    pub compiler: Option<String>,

    /// Directory the output is written into.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Write into an existing target.
    #[arg(short = 'f', long = "force", help = "Write into an existing target")]
    pub force: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `source-tpl list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// List template roles instead of project kinds.
    #[arg(long = "roles", help = "List template roles and override file names")]
    pub roles: bool,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    Plain,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `source-tpl init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `source-tpl completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `source-tpl config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.author`.
        key: String,
    },
    /// Set a configuration key to a value.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
}

impl From<Language> for sourcetpl_core::domain::Language {
    fn from(lang: Language) -> Self {
        match lang {
            Language::C => Self::C,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::C => write!(f, "c"),
        }
    }
}

/// What `new` generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    /// Also accepted as `src`.
    #[value(alias = "src")]
    Source,
    /// Also accepted as `hdr`.
    #[value(alias = "hdr")]
    Header,
    /// Also accepted as `app`.
    #[value(alias = "app")]
    Application,
    /// Also accepted as `lib`.
    #[value(alias = "lib")]
    Library,
}

impl From<ProjectKind> for sourcetpl_core::domain::ProjectKind {
    fn from(kind: ProjectKind) -> Self {
        match kind {
            ProjectKind::Source => Self::Source,
            ProjectKind::Header => Self::Header,
            ProjectKind::Application => Self::Application,
            ProjectKind::Library => Self::Library,
        }
    }
}

impl std::fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        sourcetpl_core::domain::ProjectKind::from(*self).fmt(f)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
