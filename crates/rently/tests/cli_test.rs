//! Integration tests for the `rently` CLI binary.
//!
//! Argument parsing, help output, exit codes, and a few end-to-end runs
//! against wiremock stand-ins for the cloud.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

const ISOLATED_HOME: &str = "/tmp/rently-cli-test-nonexistent";

/// Build a [`Command`] for the `rently` binary with env isolation.
///
/// Clears `RENTLY_*` variables and points platform directories at a
/// nonexistent path so tests never touch real config or tokens.
fn rently_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("rently");
    cmd.env("HOME", ISOLATED_HOME)
        .env("XDG_CONFIG_HOME", ISOLATED_HOME)
        .env("XDG_DATA_HOME", ISOLATED_HOME)
        .env("RENTLY_HUB__TOKEN", "ha-test-token")
        .env_remove("RENTLY_CONFIG")
        .env_remove("RENTLY_OUTPUT")
        .env_remove("RENTLY_TIMEOUT")
        .env_remove("RENTLY_EMAIL")
        .env_remove("RENTLY_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn toml_path(path: &Path) -> String {
    format!("{:?}", path.display().to_string())
}

/// Config pointing every endpoint at `server` and tokens into `dir`.
fn write_config(dir: &Path, server: &MockServer) -> std::path::PathBuf {
    let config = dir.join("config.toml");
    let text = format!(
        "timeout = 5\n\n\
         [cloud]\n\
         login_url = \"{uri}/oauth/token\"\n\
         api_base = \"{uri}/api/\"\n\
         thermostat_id = \"thermo-1\"\n\
         lock_id = \"lock-1\"\n\n\
         [tokens]\n\
         raw = {raw}\n\
         bearer = {bearer}\n",
        uri = server.uri(),
        raw = toml_path(&dir.join("tokens/raw.txt")),
        bearer = toml_path(&dir.join("tokens/bearer.txt")),
    );
    std::fs::write(&config, text).unwrap();
    config
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = rently_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    rently_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Home Assistant")
            .and(predicate::str::contains("sync"))
            .and(predicate::str::contains("thermostat"))
            .and(predicate::str::contains("unlock"))
            .and(predicate::str::contains("refresh")),
    );
}

#[test]
fn test_version_flag() {
    rently_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rently"));
}

#[test]
fn test_completions_bash() {
    rently_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_unknown_subcommand_fails() {
    rently_cmd().arg("defrost").assert().failure().code(2);
}

// ── Argument validation ─────────────────────────────────────────────

#[test]
fn test_thermostat_invalid_mode() {
    let output = rently_cmd()
        .args(["thermostat", "72", "auto"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("Invalid mode"), "{text}");
}

#[test]
fn test_thermostat_invalid_setpoint() {
    let output = rently_cmd()
        .args(["thermostat", "warm", "heat"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("Invalid setpoint"), "{text}");
}

#[test]
fn test_thermostat_validates_before_reading_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "timeout = \"not a number\"").unwrap();

    rently_cmd()
        .arg("--config")
        .arg(&config)
        .args(["thermostat", "72", "dry"])
        .assert()
        .code(2);
}

#[test]
fn test_zero_timeout_flag_rejected() {
    rently_cmd().args(["--timeout", "0", "unlock"]).assert().code(2);
}

#[test]
fn test_zero_timeout_in_config_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "timeout = 0\n\n[cloud]\nlock_id = \"lock-1\"\n").unwrap();

    rently_cmd()
        .arg("--config")
        .arg(&config)
        .arg("unlock")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("timeout"));
}

#[test]
fn test_refresh_without_credentials() {
    let output = rently_cmd().arg("refresh").output().unwrap();
    assert_eq!(output.status.code(), Some(4));
    let text = combined_output(&output);
    assert!(text.contains("RENTLY_EMAIL"), "{text}");
}

#[test]
fn test_unlock_without_lock_id() {
    rently_cmd().arg("unlock").assert().code(4);
}

#[test]
fn test_malformed_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "timeout = \"soon\"").unwrap();

    rently_cmd()
        .arg("--config")
        .arg(&config)
        .arg("sync")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("config loading failed"));
}

// ── Config subcommands ──────────────────────────────────────────────

#[test]
fn test_config_path_respects_flag() {
    rently_cmd()
        .args(["--config", "/tmp/somewhere/rently.toml", "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/somewhere/rently.toml"));
}

#[test]
fn test_config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("nested/config.toml");

    rently_cmd()
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    rently_cmd()
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("remotapp.rently.com")
                .and(predicate::str::contains("input_boolean.rently_syncing"))
                .and(predicate::str::contains("ha-test-token").not())
                .and(predicate::str::contains("********")),
        );

    // A second init refuses to clobber the file.
    rently_cmd()
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .code(2);
}

// ── End-to-end against a mock cloud ─────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_refresh_writes_token_files() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_json(json!({ "email": "tenant@example.com", "password": "s3cret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &server);

    let output = tokio::task::spawn_blocking(move || {
        rently_cmd()
            .arg("--config")
            .arg(&config)
            .arg("refresh")
            .env("RENTLY_EMAIL", "tenant@example.com")
            .env("RENTLY_PASSWORD", "s3cret")
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    let text = combined_output(&output);
    assert!(output.status.success(), "{text}");
    assert!(text.contains("Saved raw token -> "), "{text}");
    assert!(text.contains("Saved bearer token -> "), "{text}");
    assert_eq!(
        std::fs::read_to_string(dir.path().join("tokens/raw.txt")).unwrap(),
        "tok-1"
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("tokens/bearer.txt")).unwrap(),
        "Bearer tok-1"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unlock_with_stored_token() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/devices/lock-1"))
        .and(header("authorization", "Bearer stored"))
        .and(body_json(json!({ "commands": { "mode": "unlock" } })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &server);
    std::fs::create_dir_all(dir.path().join("tokens")).unwrap();
    std::fs::write(dir.path().join("tokens/raw.txt"), "stored\n").unwrap();

    let output = tokio::task::spawn_blocking(move || {
        rently_cmd()
            .arg("--config")
            .arg(&config)
            .arg("unlock")
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(stdout.trim(), "Door unlock sent OK");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_repeated_rejection_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/devices/thermo-1"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "fresh" })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &server);
    std::fs::create_dir_all(dir.path().join("tokens")).unwrap();
    std::fs::write(dir.path().join("tokens/raw.txt"), "stale").unwrap();

    let output = tokio::task::spawn_blocking(move || {
        rently_cmd()
            .arg("--config")
            .arg(&config)
            .args(["thermostat", "68.5", "heat"])
            .env("RENTLY_EMAIL", "tenant@example.com")
            .env("RENTLY_PASSWORD", "s3cret")
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(output.status.code(), Some(5), "{}", combined_output(&output));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_thermostat_json_output() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/devices/thermo-1"))
        .and(body_json(json!({ "commands": { "mode": "cool", "setpoint": 72 } })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &server);
    std::fs::create_dir_all(dir.path().join("tokens")).unwrap();
    std::fs::write(dir.path().join("tokens/bearer.txt"), "Bearer tok").unwrap();

    let output = tokio::task::spawn_blocking(move || {
        rently_cmd()
            .arg("--config")
            .arg(&config)
            .args(["--output", "json-compact", "thermostat", " 71.6 ", "COOL"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value, json!({ "commands": { "mode": "cool", "setpoint": 72 } }));
}
