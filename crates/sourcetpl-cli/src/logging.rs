//! Tracing subscriber setup for the `source-tpl` binary.
//!
//! The core and adapter crates only emit events; this is the one place a
//! subscriber is installed. Filter precedence:
//!
//! 1. `SOURCE_TPL_LOG` (same syntax as `RUST_LOG`)
//! 2. `RUST_LOG`
//! 3. `-q`/`-v` applied to the workspace crates, see [`GlobalArgs::log_level`]
//!
//! Logs always go to stderr so `--output-format json` stays parseable.

use std::io::{self, IsTerminal as _};

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

/// Application-specific filter variable, checked before `RUST_LOG`.
pub const LOG_ENV: &str = "SOURCE_TPL_LOG";

/// Crates whose events are shown when the level comes from the flags.
const WORKSPACE_TARGETS: &[&str] = &["source_tpl", "sourcetpl_core", "sourcetpl_adapters"];

pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = args.log_level();
    let filter = env_filter().unwrap_or_else(|| EnvFilter::new(flag_directives(level)));

    // targets tell core events from adapter events once per-file logging is on
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(!args.no_color && io::stderr().is_terminal())
        .with_target(level >= LevelFilter::DEBUG)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber already installed: {e}"))
}

/// Filter from `SOURCE_TPL_LOG`, falling back to `RUST_LOG`.
fn env_filter() -> Option<EnvFilter> {
    EnvFilter::builder()
        .with_env_var(LOG_ENV)
        .try_from_env()
        .or_else(|_| EnvFilter::try_from_default_env())
        .ok()
}

/// `source_tpl=<level>,sourcetpl_core=<level>,...`; other crates stay off.
fn flag_directives(level: LevelFilter) -> String {
    WORKSPACE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_every_workspace_crate() {
        assert_eq!(
            flag_directives(LevelFilter::DEBUG),
            "source_tpl=debug,sourcetpl_core=debug,sourcetpl_adapters=debug"
        );
    }

    #[test]
    fn directives_parse_as_filter() {
        for level in [LevelFilter::ERROR, LevelFilter::WARN, LevelFilter::TRACE] {
            let directives = flag_directives(level);
            assert!(
                EnvFilter::try_new(&directives).is_ok(),
                "rejected: {directives}"
            );
        }
    }
}
