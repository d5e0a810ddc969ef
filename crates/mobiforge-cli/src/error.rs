//! CLI errors: one enum for everything a command can fail with, mapped onto
//! exit codes and rendered with suggestions on stderr.

use std::error::Error;
use std::fmt::Write as _;

use owo_colors::OwoColorize;
use thiserror::Error;

use mobiforge_core::{
    domain::DomainError,
    error::{ErrorCategory as CoreCategory, ForgeError},
};

pub type CliResult<T> = Result<T, CliError>;

type BoxedSource = Box<dyn Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Flags, request files or values the user supplied are unusable.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// A settings file could not be read, parsed or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Unknown config key '{key}'")]
    UnknownConfigKey { key: String },

    /// The generation pipeline or the app model refused the request.
    #[error("{0}")]
    Core(#[from] ForgeError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A prompt was dismissed.
    #[error("Operation cancelled")]
    Cancelled,

    /// The binary was built without a cargo feature the command needs.
    #[error("Feature not available: {feature}")]
    FeatureNotAvailable { feature: &'static str },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        Self::Core(err.into())
    }
}

impl CliError {
    /// Hints printed under the error message.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec![
                "Run `mobiforge generate --help` for the accepted flags".into(),
                "Request files take: name, template, platform, [design], [services.<provider>]"
                    .into(),
            ],
            Self::ConfigError { .. } => vec![
                "Show which file is read: mobiforge config path".into(),
                "Write a fresh default: mobiforge init --force".into(),
            ],
            Self::UnknownConfigKey { .. } => vec![
                "Known keys: defaults.template, defaults.platform, defaults.name,".into(),
                "  output.no_color, output.format, templates.local_path,".into(),
                "  design.<setting>, services.<provider>.<setting>".into(),
            ],
            Self::Core(core) => core.suggestions(),
            Self::IoError { .. } => vec!["Check that the path exists and is readable".into()],
            Self::Cancelled => Vec::new(),
            Self::FeatureNotAvailable { feature } => vec![format!(
                "Rebuild with the feature enabled: cargo install mobiforge-cli --features {feature}"
            )],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::Cancelled => ErrorCategory::UserError,
            Self::ConfigError { .. }
            | Self::UnknownConfigKey { .. }
            | Self::FeatureNotAvailable { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Compatibility => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Pipeline => ErrorCategory::Pipeline,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Process exit code.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Pipeline      |  5   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Pipeline => 5,
            ErrorCategory::Internal => 1,
        }
    }

    pub fn format_colored(&self, verbose: bool) -> String {
        self.render(verbose, true)
    }

    pub fn format_plain(&self, verbose: bool) -> String {
        self.render(verbose, false)
    }

    fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: String, style: fn(&str) -> String| {
            if color { style(&text) } else { text }
        };
        let mut out = String::new();

        let _ = writeln!(
            out,
            "\n{} {}",
            paint("Error:".into(), |s| s.red().bold().to_string()),
            paint(self.to_string(), |s| s.red().to_string()),
        );
        if let Some(stage) = self.stage() {
            let _ = writeln!(out, "  {}", paint(format!("stage: {stage}"), |s| s.dimmed().to_string()));
        }

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                let _ = writeln!(out, "  Caused by: {err}");
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let _ = writeln!(
                out,
                "\n{}",
                paint("Suggestions:".into(), |s| s.yellow().bold().to_string())
            );
            for suggestion in &suggestions {
                let _ = writeln!(out, "  {suggestion}");
            }
        }

        if !verbose {
            let _ = writeln!(
                out,
                "\n{}",
                paint("Use -v / --verbose for more details.".into(), |s| s.dimmed().to_string())
            );
        }
        out
    }

    /// Pipeline stage the run stopped at, for core pipeline errors.
    fn stage(&self) -> Option<&'static str> {
        match self {
            Self::Core(core) => core
                .as_application()
                .and_then(|e| e.stage())
                .map(|stage| stage.as_str()),
            _ => None,
        }
    }

    /// Record the failure in the log before it is printed.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(category = ?self.category(), "{self}")
            }
            ErrorCategory::Pipeline => {
                tracing::error!(stage = self.stage().unwrap_or("-"), "pipeline failed: {self}")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(category = ?self.category(), "{self}")
            }
        }
        if let Some(source) = self.source() {
            tracing::debug!(%source, "caused by");
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Unknown template or platform.
    NotFound,
    /// Configuration error.
    Configuration,
    /// A pipeline stage reported a failure.
    Pipeline,
    /// Internal/system error.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, toml::de::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::InvalidInput {
            message: format!("{}: {e}", f().into()),
            source: Some(Box::new(e)),
        })
    }
}
