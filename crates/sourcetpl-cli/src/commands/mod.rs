//! One module per subcommand, each exposing `execute`.

pub mod completions;
pub mod config;
pub mod init;
pub mod list;
pub mod new;
