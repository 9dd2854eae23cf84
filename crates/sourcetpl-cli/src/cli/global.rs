//! Flags accepted before or after any subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum};
use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log template selection and writes (-v info, -vv every file, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable ANSI colors in messages and logs
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Read settings from FILE instead of the per-user config.
    ///
    /// Long form only: `-c` is `new --content`.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How results are printed; `json` emits one document on stdout
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub output_format: OutputFormat,
}

impl GlobalArgs {
    /// Level applied to the workspace crates when no log filter is set in
    /// the environment. `--quiet` wins over any `-v`.
    pub fn log_level(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::ERROR,
            (false, 0) => LevelFilter::WARN,
            (false, 1) => LevelFilter::INFO,
            (false, 2) => LevelFilter::DEBUG,
            (false, _) => LevelFilter::TRACE,
        }
    }
}

/// Rendering of command results. Also settable as `output.format` in config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human on a terminal, plain when piped
    #[default]
    Auto,
    /// Colored, with status symbols
    Human,
    /// No colors
    Plain,
    /// Reports, plans and listings as JSON
    Json,
}
