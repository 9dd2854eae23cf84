//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `SOURCE_TPL__<SECTION>__<KEY>`
//! 3. Config file: `--config PATH`, or `source-tpl/config.toml` in the
//!    platform config directory
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::cli::{Language, OutputFormat, ProjectKind};

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "SOURCE_TPL";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for `new`.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Template settings.
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub author: Option<String>,
    pub compiler: Option<String>,
    pub language: Option<Language>,
    pub kind: Option<ProjectKind>,
    pub git: bool,
    pub package: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub color: bool,
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Auto,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory of `<language>/<role>[.packaged].tpl` overrides.
    pub directory: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from file and environment on top of the defaults.
    ///
    /// An explicit `--config` file must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_with(config_file, Self::environment())
    }

    fn load_with(config_file: Option<&PathBuf>, env: Environment) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };

        let config = Config::builder()
            .add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(env)
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?;

        config
            .try_deserialize()
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.source-tpl.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "source-tpl")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".source-tpl.toml"))
    }

    /// The file `config set` and `init` write to.
    pub fn active_path(config_file: Option<&PathBuf>) -> PathBuf {
        config_file.cloned().unwrap_or_else(Self::config_path)
    }

    /// Serialize as TOML, skipping unset values.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("failed to serialize configuration")
    }

    /// Template override directory, if configured.
    pub fn template_dir(&self) -> Option<&Path> {
        self.templates.directory.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn no_env() -> Environment {
        AppConfig::environment().source(Some(config::Map::new()))
    }

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert!(cfg.output.color);
        assert_eq!(cfg.output.format, OutputFormat::Auto);
        assert_eq!(cfg.defaults.author, None);
        assert!(!cfg.defaults.git);
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");
        assert!(AppConfig::load_with(Some(&path), no_env()).is_err());
    }

    #[test]
    fn file_values_are_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[defaults]\nauthor = \"Jane Doe\"\nkind = \"library\"\ngit = true\n\n\
             [output]\ncolor = false\n",
        )
        .unwrap();

        let cfg = AppConfig::load_with(Some(&path), no_env()).unwrap();
        assert_eq!(cfg.defaults.author.as_deref(), Some("Jane Doe"));
        assert_eq!(cfg.defaults.kind, Some(ProjectKind::Library));
        assert!(cfg.defaults.git);
        assert!(!cfg.output.color);
        assert_eq!(cfg.defaults.compiler, None);
    }

    #[test]
    fn environment_overrides_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[defaults]\ncompiler = \"gcc\"\n").unwrap();

        let mut vars = config::Map::new();
        vars.insert("SOURCE_TPL__DEFAULTS__COMPILER".into(), "clang".into());
        let env = AppConfig::environment().source(Some(vars));

        let cfg = AppConfig::load_with(Some(&path), env).unwrap();
        assert_eq!(cfg.defaults.compiler.as_deref(), Some("clang"));
    }

    #[test]
    fn malformed_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[defaults]\nkind = \"spaceship\"\n").unwrap();

        assert!(AppConfig::load_with(Some(&path), no_env()).is_err());
    }

    #[test]
    fn toml_roundtrip_skips_unset() {
        let mut cfg = AppConfig::default();
        cfg.defaults.author = Some("Jane".into());
        let text = cfg.to_toml().unwrap();
        assert!(text.contains("author = \"Jane\""));
        assert!(!text.contains("compiler"));
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
