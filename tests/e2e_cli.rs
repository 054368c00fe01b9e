//! CLI end-to-end tests

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[allow(deprecated)]
fn clearcast_cmd() -> Command {
    Command::cargo_bin("clearcast").unwrap()
}

#[test]
fn test_cli_no_args_shows_help() {
    clearcast_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    clearcast_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("clearcast"));
}

#[test]
fn test_cli_start_help() {
    clearcast_cmd()
        .args(["start", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Start the gateway server"));
}

#[test]
fn test_cli_check_tools_command() {
    clearcast_cmd()
        .arg("check-tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("ffmpeg"));
}

#[test]
fn test_cli_validate_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("clearcast.toml");
    std::fs::write(
        &path,
        r#"
[server]
port = 8099

[upstream]
base_url = "https://origin.example.com"
allowed_el_upstreams = ["cdn.example.com"]
"#,
    )
    .unwrap();

    clearcast_cmd()
        .env_remove("PORT")
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("8099"));
}

#[test]
fn test_cli_validate_rejects_bad_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("clearcast.toml");
    std::fs::write(&path, "[server]\nport = 0\n").unwrap();

    clearcast_cmd()
        .env_remove("PORT")
        .arg("validate")
        .arg(&path)
        .assert()
        .failure();
}
