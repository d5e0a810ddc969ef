//! `mobiforge config`: read and write configuration values.
//!
//! `get` and `list` show the effective settings (all layers merged). `set`
//! edits a single file in place and leaves the other layers alone.

use std::{fs, path::Path};

use toml::{Table, Value};
use tracing::info;

use crate::{
    cli::ConfigCommands,
    config::Settings,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    config_file: Option<&Path>,
    settings: Settings,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&settings, &key)?;
            output.data(&value)?;
        }

        ConfigCommands::Set { key, value } => {
            let path = Settings::writable_path(config_file);
            set_config_value(&path, &key, &value)?;
            info!(%key, path = %path.display(), "config value written");
            output.success(&format!("{key} = {value} ({})", path.display()))?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            output.data(settings.to_toml()?.trim_end())?;
        }

        ConfigCommands::Path => {
            let path = config_file
                .map(Path::to_path_buf)
                .unwrap_or_else(Settings::config_path);
            output.data(&path.display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn check_key(key: &str) -> CliResult<Vec<&str>> {
    let segments: Vec<&str> = key.split('.').collect();
    let known = match segments.as_slice() {
        ["defaults", "template" | "platform" | "name"] => true,
        ["output", "no_color" | "format"] => true,
        ["templates", "local_path"] => true,
        ["design", setting] => !setting.is_empty(),
        ["services", provider, setting] => !provider.is_empty() && !setting.is_empty(),
        _ => false,
    };
    if known {
        Ok(segments)
    } else {
        Err(CliError::UnknownConfigKey { key: key.into() })
    }
}

fn get_config_value(settings: &Settings, key: &str) -> CliResult<String> {
    let segments = check_key(key)?;
    let root = Value::try_from(settings).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise settings: {e}"),
        source: Some(Box::new(e)),
    })?;

    let value = segments
        .iter()
        .try_fold(&root, |node, segment| node.get(*segment));
    Ok(match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        // Known key with no value (unset optional).
        None => String::new(),
    })
}

fn set_config_value(path: &Path, key: &str, raw: &str) -> CliResult<()> {
    let segments = check_key(key)?;

    let mut table: Table = if path.is_file() {
        let content = fs::read_to_string(path)
            .with_cli_context(|| format!("Failed to read '{}'", path.display()))?;
        toml::from_str(&content).map_err(|e| CliError::ConfigError {
            message: format!("'{}' is not valid TOML: {e}", path.display()),
            source: Some(Box::new(e)),
        })?
    } else {
        Table::new()
    };

    let value = match (segments.as_slice(), raw) {
        (["output", "no_color"], "true") => Value::Boolean(true),
        (["output", "no_color"], "false") => Value::Boolean(false),
        (["output", "no_color"], other) => {
            return Err(CliError::InvalidInput {
                message: format!("output.no_color expects true or false, got '{other}'"),
                source: None,
            });
        }
        _ => Value::String(raw.to_string()),
    };
    insert(&mut table, &segments, value)?;

    let rendered = toml::to_string_pretty(&table).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create '{}'", parent.display()))?;
    }
    fs::write(path, rendered).with_cli_context(|| format!("Failed to write '{}'", path.display()))
}

/// Insert `value` at the dotted path, creating intermediate tables.
fn insert(table: &mut Table, segments: &[&str], value: Value) -> CliResult<()> {
    let Some((last, parents)) = segments.split_last() else {
        return Ok(());
    };

    let mut node = table;
    for segment in parents {
        let entry = node
            .entry(segment.to_string())
            .or_insert_with(|| Value::Table(Table::new()));
        node = entry.as_table_mut().ok_or_else(|| CliError::ConfigError {
            message: format!("'{segment}' is not a table in the config file"),
            source: None,
        })?;
    }
    node.insert(last.to_string(), value);
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn get_known_key() {
        let settings = Settings::default();
        assert_eq!(get_config_value(&settings, "defaults.platform").unwrap(), "ios");
        assert_eq!(get_config_value(&settings, "output.no_color").unwrap(), "false");
        assert_eq!(get_config_value(&settings, "defaults.name").unwrap(), "");
    }

    #[test]
    fn get_nested_service_setting() {
        let mut settings = Settings::default();
        settings
            .services
            .entry("sentry".into())
            .or_default()
            .insert("dsn".into(), "https://k@s.io/1".into());
        assert_eq!(
            get_config_value(&settings, "services.sentry.dsn").unwrap(),
            "https://k@s.io/1"
        );
    }

    #[test]
    fn get_unknown_key_is_error() {
        assert!(matches!(
            get_config_value(&Settings::default(), "defaults.lang"),
            Err(CliError::UnknownConfigKey { .. })
        ));
        assert!(check_key("services.firebase").is_err());
        assert!(check_key("design.").is_err());
    }

    #[test]
    fn set_creates_and_updates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/config.toml");

        set_config_value(&path, "defaults.platform", "android").unwrap();
        set_config_value(&path, "services.firebase.project_id", "demo-42").unwrap();
        set_config_value(&path, "output.no_color", "true").unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.defaults.platform.as_deref(), Some("android"));
        assert_eq!(settings.services["firebase"]["project_id"], "demo-42");
        assert!(settings.output.no_color);
    }

    #[test]
    fn set_preserves_other_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[design]\nfont_family = \"Inter\"\n").unwrap();

        set_config_value(&path, "design.dark_mode", "true").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("font_family = \"Inter\""));
        assert!(content.contains("dark_mode = \"true\""));
    }

    #[test]
    fn set_rejects_bad_bool() {
        let temp = TempDir::new().unwrap();
        let err = set_config_value(&temp.path().join("c.toml"), "output.no_color", "maybe").unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { .. }));
    }
}
