//! Output management and formatting.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::Settings;

/// Manages CLI output based on flags and settings.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded settings.
    pub fn new(args: &GlobalArgs, settings: &Settings) -> Self {
        // The flag wins over `output.format`; Auto resolves by TTY.
        let requested = match args.output_format {
            OutputFormat::Auto => OutputFormat::from_setting(&settings.output.format),
            explicit => explicit,
        };
        let resolved_format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            explicit => explicit,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || settings.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Machine-readable payload; never suppressed.
    pub fn data(&self, payload: &str) -> io::Result<()> {
        self.term.write_line(payload)
    }

    /// `✓ <msg>` in green.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status('\u{2713}', msg, |s| s.green().bold().to_string())
    }

    /// `⚠ <msg>` in yellow.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status('\u{26a0}', msg, |s| s.yellow().bold().to_string())
    }

    /// `ℹ <msg>` in blue.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status('\u{2139}', msg, |s| s.blue().bold().to_string())
    }

    fn status(&self, glyph: char, msg: &str, paint: fn(&str) -> String) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = format!("{glyph} {msg}");
        if self.no_color {
            self.term.write_line(&line)
        } else {
            self.term.write_line(&paint(&line))
        }
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Dimmed secondary text, for table rows.
    pub fn dim(&self, text: &str) -> String {
        if self.no_color {
            text.to_owned()
        } else {
            text.dimmed().to_string()
        }
    }

    /// Spinner on stderr; hidden unless human output is going to a terminal.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.quiet || self.resolved_format != OutputFormat::Human {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(msg.to_owned());
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(quiet: bool, no_color: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            log_file: None,
            output_format: format,
        };
        OutputManager::new(&args, &Settings::default())
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.print("hello").is_ok());
    }

    #[test]
    fn no_color_flag_reported() {
        let colored = make_manager(false, false, OutputFormat::Human);
        let no_color = make_manager(false, true, OutputFormat::Human);
        assert!(colored.supports_color());
        assert!(!no_color.supports_color());
    }

    #[test]
    fn plain_and_json_never_colour() {
        assert!(!make_manager(false, false, OutputFormat::Plain).supports_color());
        assert!(!make_manager(false, false, OutputFormat::Json).supports_color());
    }

    #[test]
    fn setting_applies_when_flag_is_auto() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            log_file: None,
            output_format: OutputFormat::Auto,
        };
        let mut settings = Settings::default();
        settings.output.format = "json".into();
        assert_eq!(OutputManager::new(&args, &settings).format(), OutputFormat::Json);
    }

    #[test]
    fn spinner_hidden_for_plain_output() {
        let out = make_manager(false, true, OutputFormat::Plain);
        assert!(out.spinner("working").is_hidden());
    }
}
