//! Integration tests for the `fortiform` binary.
//!
//! Offline commands run against the built-in registry; FortiGate-bound
//! commands run against a wiremock server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `fortiform` binary with env isolation.
///
/// Clears `FORTIOS_*` / `FORTIFORM_*` variables and points config
/// directories at a nonexistent path so tests never touch real config.
fn fortiform_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("fortiform");
    cmd.env("HOME", "/tmp/fortiform-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/fortiform-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("FORTIFORM_PROFILE")
        .env_remove("FORTIFORM_OUTPUT")
        .env_remove("FORTIOS_ACCESS_HOSTNAME")
        .env_remove("FORTIOS_ACCESS_TOKEN")
        .env_remove("FORTIOS_INSECURE")
        .env_remove("FORTIOS_CA_CABUNDLE")
        .env_remove("FORTIOS_VDOM")
        .env_remove("FORTIOS_HTTP_PROXY")
        .env_remove("FORTIOS_IMPORT_TABLE")
        .env_remove("RUST_LOG");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn cmdb_ok(results: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "http_method": "GET",
        "results": results,
        "vdom": "root",
        "status": "success",
        "http_status": 200,
    }))
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = fortiform_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_lists_commands() {
    fortiform_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("FortiGate")
            .and(predicate::str::contains("create"))
            .and(predicate::str::contains("import"))
            .and(predicate::str::contains("data-sources")),
    );
}

#[test]
fn test_completions_zsh() {
    fortiform_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Offline registry ────────────────────────────────────────────────

#[test]
fn test_resources_plain() {
    fortiform_cmd()
        .args(["resources", "-o", "plain"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("fortios_firewall_address\n")
                .and(predicate::str::contains("fortios_system_global"))
                .and(predicate::str::contains("fortios_routerbgp_network")),
        );
}

#[test]
fn test_data_sources_include_lists() {
    fortiform_cmd()
        .args(["data-sources", "-o", "plain"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("fortios_firewall_addresslist")
                .and(predicate::str::contains("fortios_system_globallist").not()),
        );
}

#[test]
fn test_schema_of_one_resource() {
    let output = fortiform_cmd()
        .args(["schema", "firewall_address", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let doc: Value = serde_json::from_slice(&output.stdout).unwrap();
    let name = &doc["block"]["attributes"]["name"];
    assert_eq!(name["optional"], true);
    assert_eq!(name["computed"], true);
    assert_eq!(doc["block"]["attributes"]["vdomparam"]["type"], "string");
}

#[test]
fn test_unknown_type_is_usage_error() {
    let output = fortiform_cmd()
        .args(["schema", "firewall_bogus"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("firewall_bogus"), "{text}");
}

#[test]
fn test_read_without_fortigate_reports_missing_config() {
    fortiform_cmd()
        .args(["read", "firewall_address", "web"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No FortiGate configured"));
}

// ── Against a mock FortiGate ────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_read_prints_state_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/cmdb/firewall/address/web"))
        .and(query_param("vdom", "root"))
        .respond_with(cmdb_ok(json!([{
            "name": "web",
            "type": "ipmask",
            "subnet": "10.0.0.0 255.255.255.0",
            "comment": "",
        }])))
        .mount(&server)
        .await;

    let output = fortiform_cmd()
        .args([
            "--hostname",
            &server.uri(),
            "--token",
            "t0ken",
            "--vdom",
            "root",
            "-o",
            "json",
            "read",
            "firewall_address",
            "web",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let state: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(state["id"], "web");
    assert_eq!(state["name"], "web");
    assert_eq!(state["type"], "ipmask");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_read_missing_object_exits_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/cmdb/firewall/address/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": "error",
            "http_status": 404,
            "error": -3,
        })))
        .mount(&server)
        .await;

    let output = fortiform_cmd()
        .args([
            "--hostname",
            &server.uri(),
            "--token",
            "t0ken",
            "read",
            "firewall_address",
            "gone",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_requires_yes_when_not_interactive() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(cmdb_ok(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let output = fortiform_cmd()
        .args([
            "--hostname",
            &server.uri(),
            "--token",
            "t0ken",
            "delete",
            "firewall_address",
            "web",
        ])
        .write_stdin("")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--yes"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_with_yes_calls_api() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v2/cmdb/firewall/address/web"))
        .respond_with(cmdb_ok(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    fortiform_cmd()
        .args([
            "--hostname",
            &server.uri(),
            "--token",
            "t0ken",
            "--yes",
            "delete",
            "firewall_address",
            "web",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Deleted firewall_address 'web'"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_read_output_feeds_back_into_update() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/cmdb/firewall/address/web"))
        .respond_with(cmdb_ok(json!([{
            "name": "web",
            "type": "ipmask",
            "subnet": "10.0.0.0 255.255.255.0",
        }])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v2/cmdb/firewall/address/web"))
        .respond_with(cmdb_ok(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let read = fortiform_cmd()
        .args(["--hostname", &uri, "--token", "t0ken", "-o", "json"])
        .args(["read", "firewall_address", "web"])
        .output()
        .unwrap();
    assert!(read.status.success(), "{}", combined_output(&read));

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("web.json");
    std::fs::write(&file, &read.stdout).unwrap();

    let update = fortiform_cmd()
        .args(["--hostname", &uri, "--token", "t0ken", "-o", "json"])
        .args(["update", "firewall_address", "web", "--from-file"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(update.status.success(), "{}", combined_output(&update));
}

// ── Config file safety ──────────────────────────────────────────────

fn config_file_in(home: &std::path::Path) -> std::path::PathBuf {
    let output = fortiform_cmd()
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .args(["config", "path"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    let path = std::path::PathBuf::from(String::from_utf8(output.stdout).unwrap().trim());
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    path
}

#[test]
fn test_config_set_leaves_broken_file_untouched() {
    let home = tempfile::tempdir().unwrap();
    let path = config_file_in(home.path());
    let broken = "[profiles.lab\nhostname = \"10.0.0.1\"\n\n[profiles.prod]\nhostname = \"10.0.0.2\"\n";
    std::fs::write(&path, broken).unwrap();

    fortiform_cmd()
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .args(["config", "set", "vdom", "root"])
        .assert()
        .failure();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), broken);
}

#[test]
fn test_config_set_does_not_persist_env_overrides() {
    let home = tempfile::tempdir().unwrap();
    let path = config_file_in(home.path());
    std::fs::write(
        &path,
        "default_profile = \"lab\"\n\n[defaults]\ntimeout = 30\n\n[profiles.lab]\nhostname = \"10.0.0.1\"\n",
    )
    .unwrap();

    fortiform_cmd()
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env("FORTIOS_DEFAULTS__TIMEOUT", "90")
        .args(["config", "set", "vdom", "root"])
        .assert()
        .success();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("timeout = 30"), "{written}");
    assert!(!written.contains("timeout = 90"), "{written}");
    assert!(written.contains("vdom = \"root\""), "{written}");
}
