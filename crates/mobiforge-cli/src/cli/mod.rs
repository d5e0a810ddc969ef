//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "mobiforge",
    bin_name = "mobiforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f4f1} Declarative mobile app generation",
    long_about = "Mobiforge turns an app request (template, platform, design and \
                  services) into a generated mobile app description.",
    after_help = "EXAMPLES:\n\
        \x20 mobiforge generate -t tabbed -p ios -n \"Field Notes\"\n\
        \x20 mobiforge generate -t blank -p web --design primary_color=#1e88e5\n\
        \x20 mobiforge list templates\n\
        \x20 mobiforge completions bash > /usr/share/bash-completion/completions/mobiforge",
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

impl Cli {
    /// Commands that may create the `--config` file rather than read it.
    pub fn creates_config_file(&self) -> bool {
        matches!(
            self.command,
            Commands::Init(_) | Commands::Config(ConfigCommands::Set { .. } | ConfigCommands::Path)
        )
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the generation pipeline for one app.
    #[command(
        visible_alias = "g",
        about = "Generate an app",
        after_help = "EXAMPLES:\n\
            \x20 mobiforge generate -t tabbed -p android -n \"Trail Guide\"\n\
            \x20 mobiforge generate -t blank -p ios --service firebase.project_id=demo-42\n\
            \x20 mobiforge generate --request app.toml --format json"
    )]
    Generate(GenerateArgs),

    /// List registered templates or platforms.
    #[command(
        visible_alias = "ls",
        about = "List templates or platforms",
        after_help = "EXAMPLES:\n\
            \x20 mobiforge list templates\n\
            \x20 mobiforge list platforms --format json\n\
            \x20 mobiforge list templates --templates-dir ./my-templates"
    )]
    List(ListArgs),

    /// Initialise a mobiforge configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 mobiforge init           # default location\n\
            \x20 mobiforge init --local   # .mobiforge.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 mobiforge completions bash > ~/.local/share/bash-completion/completions/mobiforge\n\
            \x20 mobiforge completions zsh  > ~/.zfunc/_mobiforge\n\
            \x20 mobiforge completions fish > ~/.config/fish/completions/mobiforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the mobiforge configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 mobiforge config get defaults.platform\n\
            \x20 mobiforge config set defaults.platform android\n\
            \x20 mobiforge config set services.sentry.dsn https://key@sentry.io/1\n\
            \x20 mobiforge config list"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `mobiforge generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Template id (case-sensitive).
    #[arg(
        short = 't',
        long = "template",
        value_name = "ID",
        help = "Template id"
    )]
    pub template: Option<String>,

    /// Target platform (case-insensitive).
    #[arg(
        short = 'p',
        long = "platform",
        value_name = "PLATFORM",
        help = "Target platform (ios, android, web)"
    )]
    pub platform: Option<String>,

    /// App display name.
    #[arg(short = 'n', long = "name", value_name = "NAME", help = "App display name")]
    pub name: Option<String>,

    /// Design setting, repeatable.
    #[arg(
        long = "design",
        value_name = "KEY=VALUE",
        value_parser = parse_design,
        help = "Design setting (repeatable), e.g. primary_color=#1e88e5"
    )]
    pub design: Vec<(String, String)>,

    /// Service to integrate, repeatable.
    #[arg(
        long = "service",
        value_name = "PROVIDER[.KEY=VALUE]",
        value_parser = parse_service,
        help = "Service setting (repeatable), e.g. firebase.project_id=demo"
    )]
    pub services: Vec<ServiceArg>,

    /// TOML file holding a full request; flags override its values.
    #[arg(long = "request", value_name = "FILE", help = "Read the request from a TOML file")]
    pub request: Option<PathBuf>,

    /// Directory of template manifests.
    #[arg(
        long = "templates-dir",
        value_name = "DIR",
        help = "Load manifest templates from DIR"
    )]
    pub templates_dir: Option<PathBuf>,

    /// Result format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "summary",
        help = "Result format"
    )]
    pub format: GenerateFormat,

    /// Pick missing template/platform from a list.
    #[arg(
        short = 'i',
        long = "interactive",
        help = "Prompt for template and platform when not given"
    )]
    pub interactive: bool,
}

/// Output format for the `generate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenerateFormat {
    /// Human-readable summary.
    Summary,
    /// The full generation record as JSON.
    Json,
}

/// One `--service` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceArg {
    pub provider: String,
    pub setting: Option<(String, String)>,
}

fn parse_design(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{raw}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

fn parse_service(raw: &str) -> Result<ServiceArg, String> {
    let Some((provider, setting)) = raw.split_once('.') else {
        let provider = raw.trim();
        if provider.is_empty() || provider.contains('=') {
            return Err(format!("expected PROVIDER or PROVIDER.KEY=VALUE, got '{raw}'"));
        }
        return Ok(ServiceArg {
            provider: provider.to_string(),
            setting: None,
        });
    };

    let provider = provider.trim();
    if provider.is_empty() {
        return Err(format!("missing provider in '{raw}'"));
    }
    Ok(ServiceArg {
        provider: provider.to_string(),
        setting: Some(parse_design(setting)?),
    })
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `mobiforge list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// What to list.
    #[arg(value_enum, default_value = "templates", help = "What to list")]
    pub what: ListTarget,

    /// Directory of template manifests.
    #[arg(
        long = "templates-dir",
        value_name = "DIR",
        help = "Also list manifest templates from DIR"
    )]
    pub templates_dir: Option<PathBuf>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListTarget {
    Templates,
    Platforms,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One id per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `mobiforge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.mobiforge.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `mobiforge completions`.
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

/// Subcommands for `mobiforge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.platform`.
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

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_generate_command() {
        let cli = Cli::parse_from([
            "mobiforge", "generate", "-t", "tabbed", "-p", "ios", "-n", "Field Notes",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.template.as_deref(), Some("tabbed"));
        assert_eq!(args.platform.as_deref(), Some("ios"));
        assert_eq!(args.name.as_deref(), Some("Field Notes"));
        assert_eq!(args.format, GenerateFormat::Summary);
    }

    #[test]
    fn repeated_design_and_service_flags() {
        let cli = Cli::parse_from([
            "mobiforge",
            "g",
            "--design",
            "primary_color=#fff",
            "--design",
            "dark_mode = true",
            "--service",
            "firebase.project_id=demo",
            "--service",
            "sentry",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(
            args.design,
            vec![
                ("primary_color".to_string(), "#fff".to_string()),
                ("dark_mode".to_string(), "true".to_string()),
            ]
        );
        assert_eq!(
            args.services[0],
            ServiceArg {
                provider: "firebase".into(),
                setting: Some(("project_id".into(), "demo".into())),
            }
        );
        assert_eq!(args.services[1].setting, None);
    }

    #[test]
    fn design_without_equals_is_rejected() {
        assert!(parse_design("primary_color").is_err());
        assert!(parse_design("=blue").is_err());
    }

    #[test]
    fn service_parsing() {
        assert!(parse_service("").is_err());
        assert!(parse_service(".dsn=x").is_err());
        assert!(parse_service("sentry=x").is_err());
        assert!(parse_service("sentry.dsn").is_err());
        // Values may contain dots.
        let arg = parse_service("sentry.dsn=https://k@o1.ingest.sentry.io/2").unwrap();
        assert_eq!(
            arg.setting,
            Some(("dsn".into(), "https://k@o1.ingest.sentry.io/2".into()))
        );
    }

    #[test]
    fn init_and_config_set_may_create_the_config_file() {
        assert!(Cli::parse_from(["mobiforge", "init"]).creates_config_file());
        assert!(Cli::parse_from(["mobiforge", "config", "set", "a.b", "c"]).creates_config_file());
        assert!(!Cli::parse_from(["mobiforge", "config", "list"]).creates_config_file());
        assert!(!Cli::parse_from(["mobiforge", "list"]).creates_config_file());
    }

    #[test]
    fn list_defaults_to_templates() {
        let cli = Cli::parse_from(["mobiforge", "list"]);
        let Commands::List(args) = cli.command else {
            panic!("expected List command");
        };
        assert_eq!(args.what, ListTarget::Templates);
        assert_eq!(args.format, ListFormat::Table);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["mobiforge", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
