//! CLI settings.
//!
//! [`Settings`] is loaded once at startup and passed down by value.  The
//! CLI layer owns settings; the core crate never sees them.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `MOBIFORGE_<SECTION>__<KEY>`, e.g.
//!    `MOBIFORGE_DEFAULTS__PLATFORM=android`
//! 3. `.mobiforge.toml` in the current directory
//! 4. The user config file (`--config FILE` replaces it)
//! 5. Built-in defaults (always present)

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

pub const LOCAL_CONFIG_FILE: &str = ".mobiforge.toml";
const ENV_PREFIX: &str = "MOBIFORGE";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Request values used when a flag is not given.
    pub defaults: Defaults,
    pub output: OutputSettings,
    pub templates: TemplateSettings,
    /// Design settings merged under `--design`.
    pub design: BTreeMap<String, String>,
    /// Provider settings merged under `--service`.
    pub services: BTreeMap<String, BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub template: Option<String>,
    pub platform: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub no_color: bool,
    pub format: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Directory of template manifests.
    pub local_path: Option<PathBuf>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            template: Some("blank".into()),
            platform: Some("ios".into()),
            name: None,
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

impl Settings {
    /// Load settings, layering file and environment over the defaults.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&Path>) -> CliResult<Self> {
        let user_file = config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path);
        debug!(path = %user_file.display(), explicit = config_file.is_some(), "loading settings");

        let defaults = Config::try_from(&Self::default()).map_err(config_error)?;

        Config::builder()
            .add_source(defaults)
            .add_source(
                File::from(user_file.as_path())
                    .format(FileFormat::Toml)
                    .required(config_file.is_some()),
            )
            .add_source(
                File::from(Path::new(LOCAL_CONFIG_FILE))
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(config_error)
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.mobiforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "mobiforge", "mobiforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The file `config set` edits: `--config`, else a local file if present,
    /// else the user file.
    pub fn writable_path(config_file: Option<&Path>) -> PathBuf {
        match config_file {
            Some(path) => path.to_path_buf(),
            None if Path::new(LOCAL_CONFIG_FILE).is_file() => PathBuf::from(LOCAL_CONFIG_FILE),
            None => Self::config_path(),
        }
    }

    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise settings: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

fn config_error(err: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: err.to_string(),
        source: Some(Box::new(err)),
    }
}
