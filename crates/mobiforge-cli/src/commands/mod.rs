//! One module per subcommand. Each exposes an `execute` entry point.

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod list;
