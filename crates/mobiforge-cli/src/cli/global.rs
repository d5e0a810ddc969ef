//! Flags shared by every subcommand, flattened into [`super::Cli`].

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum};

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log more: `-v` stage progress, `-vv` per-stage detail, `-vvv` everything.
    ///
    /// Without it only warnings and errors reach stderr. `RUST_LOG` overrides
    /// this flag entirely.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print nothing except requested data and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Never emit ANSI colour codes (also honours `NO_COLOR`).
    #[arg(long = "no-color", global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Read settings from FILE instead of the user config file.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Append JSON log lines to FILE, in addition to stderr.
    #[arg(long = "log-file", global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// How to render messages; `auto` picks human on a terminal, plain otherwise.
    #[arg(long = "output-format", global = true, value_enum, default_value_t)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Auto,
    /// Coloured, with status glyphs and a spinner.
    Human,
    /// No colour, no spinner.
    Plain,
    /// Commands that produce data print JSON.
    Json,
}

impl OutputFormat {
    /// Parse the `output.format` setting; unknown values fall back to `Auto`.
    pub fn from_setting(value: &str) -> Self {
        Self::from_str(value.trim(), true).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setting_parse_is_case_insensitive() {
        assert_eq!(OutputFormat::from_setting(" JSON "), OutputFormat::Json);
        assert_eq!(OutputFormat::from_setting("plain"), OutputFormat::Plain);
        assert_eq!(OutputFormat::from_setting("fancy"), OutputFormat::Auto);
    }
}
