//! `mobiforge init`: create a default configuration file.

use std::path::{Path, PathBuf};

use crate::{
    cli::InitArgs,
    config::{LOCAL_CONFIG_FILE, Settings},
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Create a default mobiforge configuration file.
pub fn execute(args: InitArgs, config_file: Option<&Path>, output: OutputManager) -> CliResult<()> {
    output.info("Initialising configuration...")?;

    let config_path = target_path(&args, config_file);

    // Bail early if the file already exists and --force was not given.
    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    let toml = Settings::default().to_toml()?;

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(&config_path, &toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", config_path.display()))?;

    output.success(&format!(
        "Configuration created at {}",
        config_path.display(),
    ))?;

    Ok(())
}

/// `--local` wins, then `--config`, then the user config location.
fn target_path(args: &InitArgs, config_file: Option<&Path>) -> PathBuf {
    if args.local {
        return PathBuf::from(LOCAL_CONFIG_FILE);
    }
    config_file
        .map(Path::to_path_buf)
        .unwrap_or_else(Settings::config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_flag_targets_cwd() {
        let args = InitArgs {
            local: true,
            force: false,
        };
        assert_eq!(
            target_path(&args, Some(Path::new("/tmp/x.toml"))),
            PathBuf::from(LOCAL_CONFIG_FILE)
        );
    }

    #[test]
    fn explicit_config_is_used() {
        let args = InitArgs {
            local: false,
            force: false,
        };
        assert_eq!(
            target_path(&args, Some(Path::new("/tmp/x.toml"))),
            PathBuf::from("/tmp/x.toml")
        );
        assert_eq!(target_path(&args, None), Settings::config_path());
    }
}
