//! Integration tests for mobiforge-cli.

use std::fs;

use assert_cmd::{Command, cargo};
use predicates::prelude::*;
use tempfile::TempDir;

/// Command isolated from the user's config, `.env` and templates.
fn mobiforge(temp: &TempDir) -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("mobiforge");
    cmd.current_dir(temp.path())
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join(".config"))
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn test_help_flag() {
    let temp = TempDir::new().unwrap();
    mobiforge(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_version_flag() {
    let temp = TempDir::new().unwrap();
    mobiforge(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_generate_summary() {
    let temp = TempDir::new().unwrap();
    mobiforge(&temp)
        .args(["generate", "-t", "tabbed", "-p", "ios", "-n", "Field Notes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 'Field Notes' (tabbed \u{2192} ios)"))
        .stdout(predicate::str::contains("home, search, profile"))
        .stdout(predicate::str::contains("ios/Info.plist"));
}

#[test]
fn test_generate_writes_nothing_to_disk() {
    let temp = TempDir::new().unwrap();
    mobiforge(&temp)
        .args(["generate", "-t", "list-detail", "-p", "android"])
        .assert()
        .success();

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn test_generate_json_record() {
    let temp = TempDir::new().unwrap();
    let output = mobiforge(&temp)
        .args([
            "generate",
            "--template",
            "blank",
            "--platform",
            "WEB",
            "--name",
            "Trail Guide",
            "--design",
            "primary_color=#1E88E5",
            "--service",
            "sentry.dsn=https://key@o1.ingest.sentry.io/2",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let record = stdout_json(&output);
    assert!(record["run_id"].is_string());
    assert_eq!(record["request"]["template"], "blank");
    assert_eq!(record["app"]["platform"], "web");
    assert_eq!(record["app"]["design_tokens"]["primary_color"], "#1e88e5");
    assert_eq!(record["app"]["services"][0]["provider"], "sentry");

    let paths: Vec<&str> = record["app"]["artifacts"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|a| a["path"].as_str())
        .collect();
    assert!(paths.contains(&"web/package.json"));
    assert!(paths.contains(&"web/src/sentry-config.json"));
}

#[test]
fn test_generate_from_request_file() {
    let temp = TempDir::new().unwrap();
    let request = temp.path().join("app.toml");
    fs::write(
        &request,
        "name = \"Notes\"\ntemplate = \"tabbed\"\nplatform = \"android\"\n\n\
         [design]\nnavigation = \"drawer\"\n\n[services.firebase]\nproject_id = \"notes-1\"\n",
    )
    .unwrap();

    // The flag overrides the file's platform.
    let output = mobiforge(&temp)
        .args(["generate", "--request", "app.toml", "-p", "ios", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let record = stdout_json(&output);
    assert_eq!(record["app"]["name"], "Notes");
    assert_eq!(record["app"]["platform"], "ios");
    assert_eq!(record["app"]["layout"]["navigation"], "drawer");
}

#[test]
fn test_generate_uses_settings_defaults_and_env() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("mobiforge.toml");
    fs::write(&config, "[defaults]\ntemplate = \"tabbed\"\nplatform = \"android\"\n").unwrap();

    let output = mobiforge(&temp)
        .env("MOBIFORGE_DEFAULTS__PLATFORM", "web")
        .args(["--config", "mobiforge.toml", "generate", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let record = stdout_json(&output);
    assert_eq!(record["request"]["template"], "tabbed");
    assert_eq!(record["app"]["platform"], "web");
}

#[test]
fn test_generate_with_manifest_template() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("my-templates/onboarding");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("template.toml"),
        "[template]\nid = \"onboarding\"\n\n[metadata]\nname = \"Onboarding\"\n\n\
         [[screens]]\nname = \"welcome\"\n",
    )
    .unwrap();
    fs::write(dir.join("WELCOME.md"), "Hello {{APP_NAME_KEBAB}}\n").unwrap();

    mobiforge(&temp)
        .args([
            "generate",
            "--templates-dir",
            "my-templates",
            "-t",
            "onboarding",
            "-p",
            "ios",
            "-n",
            "Trail Guide",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("WELCOME.md"))
        .stdout(predicate::str::contains("welcome"));
}

#[test]
fn test_list_templates() {
    let temp = TempDir::new().unwrap();
    mobiforge(&temp)
        .args(["list", "templates", "--format", "list"])
        .assert()
        .success()
        .stdout("blank\nlist-detail\ntabbed\n");
}

#[test]
fn test_list_platforms_csv() {
    let temp = TempDir::new().unwrap();
    mobiforge(&temp)
        .args(["ls", "platforms", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("platform,description\n"))
        .stdout(predicate::str::contains("android,"))
        .stdout(predicate::str::contains("web,"));
}

#[test]
fn test_list_templates_json() {
    let temp = TempDir::new().unwrap();
    let output = mobiforge(&temp)
        .args(["list", "templates", "--format", "json"])
        .output()
        .unwrap();
    let listing = stdout_json(&output);
    assert_eq!(listing.as_array().unwrap().len(), 3);
    assert_eq!(listing[2]["id"], "tabbed");
}

#[test]
fn test_config_set_then_get() {
    let temp = TempDir::new().unwrap();

    mobiforge(&temp)
        .args(["--config", "cfg.toml", "config", "set", "defaults.platform", "android"])
        .assert()
        .success();

    mobiforge(&temp)
        .args(["--config", "cfg.toml", "config", "get", "defaults.platform"])
        .assert()
        .success()
        .stdout("android\n");

    mobiforge(&temp)
        .args(["--config", "cfg.toml", "config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("platform = \"android\""));
}

#[test]
fn test_init_local() {
    let temp = TempDir::new().unwrap();

    mobiforge(&temp)
        .args(["init", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration created"));
    assert!(temp.path().join(".mobiforge.toml").is_file());

    mobiforge(&temp)
        .args(["init", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_quiet_flag() {
    let temp = TempDir::new().unwrap();
    mobiforge(&temp)
        .args(["-q", "generate", "-t", "blank", "-p", "ios"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_verbose_flag_logs_stages() {
    let temp = TempDir::new().unwrap();
    mobiforge(&temp)
        .args(["-vv", "generate", "-t", "blank", "-p", "ios"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));
}

#[test]
fn test_log_file_receives_json() {
    let temp = TempDir::new().unwrap();
    mobiforge(&temp)
        .args(["-v", "--log-file", "run.log", "generate", "-t", "blank", "-p", "web"])
        .assert()
        .success();

    let log = fs::read_to_string(temp.path().join("run.log")).unwrap();
    let first: serde_json::Value = serde_json::from_str(log.lines().next().unwrap()).unwrap();
    assert!(first["level"].is_string());
    assert!(log.contains("generation finished"));
}

#[test]
fn test_shell_completions() {
    let temp = TempDir::new().unwrap();
    mobiforge(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete"));
}
