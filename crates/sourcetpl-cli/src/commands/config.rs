//! `source-tpl config`: read and write configuration values.

use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&format!("{key} = {value}"))?;
        }

        ConfigCommands::Set { key, value } => {
            let path = AppConfig::active_path(global.config.as_ref());
            set_config_value(&path, &key, &value)?;
            info!(key = %key, path = %path.display(), "Configuration updated");
            output.success(&format!("Set {key} = {value} in {}", path.display()))?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.header("Current Configuration:")?;
                output.print(&config.to_toml().map_err(CliError::config)?)?;
            }
        }

        ConfigCommands::Path => {
            output.print(
                &AppConfig::active_path(global.config.as_ref())
                    .display()
                    .to_string(),
            )?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn unknown_key(key: &str) -> CliError {
    CliError::ConfigError {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    }
}

/// Walk a dotted key through the JSON form of the config.
fn lookup<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(root, |node, segment| node.get(segment))
}

fn to_json(config: &AppConfig) -> CliResult<Value> {
    serde_json::to_value(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Value of a dotted key; unset options print as an empty string.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let json = to_json(config)?;
    match lookup(&json, key) {
        Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Object(_)) | None => Err(unknown_key(key)),
        Some(other) => Ok(other.to_string()),
    }
}

/// Write `key = value` into the TOML file at `path`, creating it if needed.
///
/// The edited document must still deserialize into [`AppConfig`], so a bad
/// enum value is rejected before anything is written.
fn set_config_value(path: &Path, key: &str, value: &str) -> CliResult<()> {
    let (section, field) = key.split_once('.').ok_or_else(|| unknown_key(key))?;
    let known = to_json(&AppConfig::default())?;
    if !matches!(lookup(&known, key), Some(v) if !v.is_object()) {
        return Err(unknown_key(key));
    }

    let mut document: toml::Table = if path.exists() {
        let text = std::fs::read_to_string(path)
            .with_cli_context(|| format!("Failed to read config '{}'", path.display()))?;
        toml::from_str(&text).map_err(|e: toml::de::Error| CliError::ConfigError {
            message: format!("Failed to parse {}: {e}", path.display()),
            source: Some(Box::new(e)),
        })?
    } else {
        toml::Table::new()
    };

    let parsed = match value {
        "true" => toml::Value::Boolean(true),
        "false" => toml::Value::Boolean(false),
        other => toml::Value::String(other.to_string()),
    };

    let table = document
        .entry(section)
        .or_insert_with(|| toml::Value::Table(toml::Table::new()));
    let toml::Value::Table(table) = table else {
        return Err(CliError::ConfigError {
            message: format!("'{section}' is not a table in {}", path.display()),
            source: None,
        });
    };
    table.insert(field.to_string(), parsed);

    toml::Value::Table(document.clone())
        .try_into::<AppConfig>()
        .map_err(|e| CliError::ConfigError {
            message: format!("Invalid value for '{key}': {e}"),
            source: Some(Box::new(e)),
        })?;

    let text = toml::to_string_pretty(&document).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }
    std::fs::write(path, text)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))
}

// ── tests ─────────────────────────────────────────────────────────────────────
