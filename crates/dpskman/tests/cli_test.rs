//! Integration tests for the `dpskman` CLI binary.
//!
//! Argument parsing, help output, and validation run without a controller.
//! The end-to-end section drives the binary against a wiremock console.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `dpskman` binary with env isolation.
///
/// Clears all `DPSKMAN_*` env vars and points the config file at a
/// nonexistent path so tests never touch the user's real configuration.
fn dpskman_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("dpskman");
    cmd.env("HOME", "/tmp/dpskman-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/dpskman-cli-test-nonexistent")
        .env(
            "DPSKMAN_CONFIG",
            "/tmp/dpskman-cli-test-nonexistent/config.toml",
        )
        .env_remove("DPSKMAN_PROFILE")
        .env_remove("DPSKMAN_CONTROLLER")
        .env_remove("DPSKMAN_USERNAME")
        .env_remove("DPSKMAN_PASSWORD")
        .env_remove("DPSKMAN_CA_CERT")
        .env_remove("DPSKMAN_INSECURE")
        .env_remove("DPSKMAN_TIMEOUT")
        .env_remove("DPSKMAN_OUTPUT")
        .env_remove("DPSKMAN_QUIET")
        .env_remove("DPSKMAN_YES")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run `dpskman` with `args` and check for a usage error (exit 2).
fn assert_usage_error(args: &[&str], expected: &str) {
    let output = dpskman_cmd().args(args).output().unwrap();
    let text = combined_output(&output);
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2:\n{text}");
    assert!(text.contains(expected), "Expected '{expected}' in output:\n{text}");
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = dpskman_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    dpskman_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("DPSK")
            .and(predicate::str::contains("dpsk"))
            .and(predicate::str::contains("backup"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    dpskman_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dpskman"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    dpskman_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    dpskman_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dpskman"));
}

// ── Field flag help ─────────────────────────────────────────────────

#[test]
fn test_list_help_lists_exact_before_regexp_flags() {
    let output = dpskman_cmd()
        .args(["dpsk", "list", "--help"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    let exact = text.find("--user").expect("--user in help");
    let regexp = text.find("--regexp-user").expect("--regexp-user in help");
    assert!(exact < regexp, "exact flags should precede regexp flags:\n{text}");
    assert!(text.contains("--wlansvc-id"));
}

#[test]
fn test_modify_help_lists_set_values() {
    dpskman_cmd()
        .args(["dpsk", "modify", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("set").and(predicate::str::contains("--passphrase")));
}

// ── Validation (no controller needed) ───────────────────────────────

#[test]
fn test_list_without_filters_is_usage_error() {
    assert_usage_error(&["dpsk", "list"], "no filters specified");
}

#[test]
fn test_list_with_empty_filter_value_is_usage_error() {
    assert_usage_error(&["dpsk", "list", "--user", ""], "no filters specified");
}

#[test]
fn test_list_unknown_flag_is_usage_error() {
    assert_usage_error(&["dpsk", "list", "--colour", "blue"], "--colour");
}

#[test]
fn test_list_invalid_mac_is_usage_error() {
    assert_usage_error(&["dpsk", "list", "--mac", "aa:bb:cc"], "invalid MAC address");
}

#[test]
fn test_list_invalid_timestamp_is_usage_error() {
    assert_usage_error(&["dpsk", "list", "--expire", "next tuesday"], "next tuesday");
}

#[test]
fn test_list_duplicate_filter_is_usage_error() {
    assert_usage_error(
        &["dpsk", "list", "--user", "alice", "--regexp-user", "^a"],
        "duplicate property filter: user",
    );
}

#[test]
fn test_list_bad_regexp_is_usage_error() {
    assert_usage_error(
        &["dpsk", "list", "--regexp-user", "("],
        "failed to compile regex",
    );
}

#[test]
fn test_modify_without_set_is_usage_error() {
    assert_usage_error(
        &["dpsk", "modify", "--user", "alice"],
        "set directive not found",
    );
}

#[test]
fn test_modify_without_values_is_usage_error() {
    assert_usage_error(
        &["dpsk", "modify", "--user", "alice", "set"],
        "no properties specified",
    );
}

#[test]
fn test_modify_id_is_not_settable() {
    let output = dpskman_cmd()
        .args(["dpsk", "modify", "--user", "alice", "set", "--id", "9"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_create_short_length_is_rejected() {
    let output = dpskman_cmd()
        .args([
            "dpsk",
            "create",
            "--wlansvc-id",
            "3",
            "--user",
            "carol",
            "--length",
            "5",
        ])
        .output()
        .unwrap();
    let text = combined_output(&output);
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2:\n{text}");
    assert!(text.contains("length"), "Expected 'length' in output:\n{text}");
}

#[test]
fn test_create_requires_user() {
    let output = dpskman_cmd()
        .args(["dpsk", "create", "--wlansvc-id", "3"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_output_format_is_rejected() {
    let output = dpskman_cmd()
        .args(["-o", "xml", "dpsk", "list", "--user", "alice"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_trailing_output_format_is_rejected() {
    assert_usage_error(&["dpsk", "list", "--user", "alice", "-o", "xml"], "xml");
}

#[test]
fn test_global_options_after_field_flags_are_accepted() {
    let output = dpskman_cmd()
        .args(["dpsk", "list", "--user", "alice", "-o", "table", "--timeout", "5"])
        .output()
        .unwrap();
    let text = combined_output(&output);
    // Parsed cleanly, so it gets as far as needing a password
    assert_eq!(output.status.code(), Some(3), "Expected exit code 3:\n{text}");
}

// ── Credentials & config ────────────────────────────────────────────

#[test]
fn test_missing_password_is_auth_error() {
    let output = dpskman_cmd()
        .args(["dpsk", "list", "--user", "alice"])
        .output()
        .unwrap();
    let text = combined_output(&output);
    assert_eq!(output.status.code(), Some(3), "Expected exit code 3:\n{text}");
    assert!(text.contains("No password"), "Expected 'No password':\n{text}");
}

#[test]
fn test_unknown_profile_is_reported() {
    let output = dpskman_cmd()
        .args(["--profile", "lab", "dpsk", "list", "--user", "alice"])
        .output()
        .unwrap();
    let text = combined_output(&output);
    assert!(!output.status.success());
    assert!(text.contains("lab"), "Expected profile name in output:\n{text}");
}

#[test]
fn test_config_show_without_file_prints_defaults() {
    dpskman_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("json"));
}

#[test]
fn test_config_profiles_without_file() {
    dpskman_cmd().args(["config", "profiles"]).assert().success();
}

// ── End-to-end against a mock controller ────────────────────────────

const LIST_REPLY: &str = r#"<ajax-response>
  <response type="object" id="dpsk-list.1">
    <apstamgr-stat>
      <dpsk-list>
        <dpsk id="1" mac="aa:bb:cc:dd:ee:ff" wlansvc-id="3" dvlan-id="0" user="alice" passphrase="p1"/>
        <dpsk id="2" mac="" wlansvc-id="3" dvlan-id="10" user="bob" passphrase="p2"/>
        <dpsk id="3" mac="" wlansvc-id="4" dvlan-id="0" user="anna" passphrase="p3"/>
      </dpsk-list>
    </apstamgr-stat>
  </response>
</ajax-response>"#;

async fn mock_controller() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admin/login.jsp"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("HTTP_X_CSRF_TOKEN", "csrf-abc")
                .insert_header("Set-Cookie", "-ejs-session-=xyz; Path=/; Secure; HttpOnly")
                .insert_header("Location", "/admin/dashboard.jsp"),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/admin/_cmdstat.jsp"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LIST_REPLY))
        .mount(&server)
        .await;

    server
}

/// Run the binary off the runtime thread so the mock server keeps serving.
async fn run_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let mut cmd = dpskman_cmd();
    cmd.args(["--controller", &server.uri(), "--password", "hunter2"])
        .args(args);
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_e2e_list_applies_every_filter() {
    let server = mock_controller().await;

    let output = run_against(
        &server,
        &[
            "-o",
            "json-compact",
            "dpsk",
            "list",
            "--wlansvc-id",
            "3",
            "--regexp-user",
            "^a",
        ],
    )
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<i64> = records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1]);
}

#[tokio::test]
async fn test_e2e_list_plain_prints_ids() {
    let server = mock_controller().await;

    let output = run_against(
        &server,
        &["-o", "plain", "dpsk", "list", "--mac", "AA-BB-CC-DD-EE-FF"],
    )
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1");
}

#[tokio::test]
async fn test_e2e_create_existing_prints_passphrase() {
    let server = mock_controller().await;

    let output = run_against(
        &server,
        &[
            "-o",
            "plain",
            "dpsk",
            "create",
            "--wlansvc-id",
            "3",
            "--user",
            "bob",
        ],
    )
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "p2");
}

#[tokio::test]
async fn test_e2e_modify_updates_matching_records() {
    let server = mock_controller().await;

    Mock::given(method("POST"))
        .and(path("/admin/_conf.jsp"))
        .and(body_string_contains("IS_PARTIAL='true'"))
        .and(body_string_contains("passphrase='rotated-secret'"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<ajax-response/>"))
        .expect(2)
        .mount(&server)
        .await;

    let output = run_against(
        &server,
        &[
            "--yes",
            "-o",
            "json-compact",
            "dpsk",
            "modify",
            "--wlansvc-id",
            "3",
            "set",
            "--passphrase",
            "rotated-secret",
        ],
    )
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["updated"], serde_json::json!([1, 2]));
}

#[tokio::test]
async fn test_e2e_modify_accepts_trailing_yes_and_output() {
    let server = mock_controller().await;

    Mock::given(method("POST"))
        .and(path("/admin/_conf.jsp"))
        .and(body_string_contains("passphrase='rotated-secret'"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<ajax-response/>"))
        .expect(2)
        .mount(&server)
        .await;

    let output = run_against(
        &server,
        &[
            "dpsk",
            "modify",
            "--wlansvc-id",
            "3",
            "set",
            "--passphrase",
            "rotated-secret",
            "--yes",
            "-o",
            "json-compact",
        ],
    )
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["updated"], serde_json::json!([1, 2]));
}

#[tokio::test]
async fn test_e2e_rejected_update_reports_http_status() {
    let server = mock_controller().await;

    Mock::given(method("POST"))
        .and(path("/admin/_conf.jsp"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(
        &server,
        &[
            "--yes",
            "dpsk",
            "modify",
            "--wlansvc-id",
            "3",
            "set",
            "--dvlan-id",
            "20",
        ],
    )
    .await;
    let text = combined_output(&output);
    assert_eq!(output.status.code(), Some(9), "Expected exit code 9:\n{text}");
    assert!(text.contains("500"), "Expected the HTTP status in output:\n{text}");
}

#[tokio::test]
async fn test_e2e_modify_without_yes_needs_a_terminal() {
    let server = mock_controller().await;

    Mock::given(method("POST"))
        .and(path("/admin/_conf.jsp"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<ajax-response/>"))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_against(
        &server,
        &["dpsk", "modify", "--user", "alice", "set", "--dvlan-id", "20"],
    )
    .await;
    let text = combined_output(&output);
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2:\n{text}");
    assert!(text.contains("confirmation"), "{text}");
}

#[tokio::test]
async fn test_e2e_rejected_login_is_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admin/login.jsp"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let output = run_against(&server, &["dpsk", "list", "--user", "alice"]).await;
    let text = combined_output(&output);
    assert_eq!(output.status.code(), Some(3), "Expected exit code 3:\n{text}");
    assert!(text.contains("Authentication failed"), "{text}");
}

#[tokio::test]
async fn test_e2e_backup_writes_archive() {
    let server = mock_controller().await;

    Mock::given(method("GET"))
        .and(path("/admin/webPage/system/admin/_savebackup.jsp"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"BACKUP-ARCHIVE".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("controller.bak");
    let output = run_against(&server, &["backup", dest.to_str().unwrap()]).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    assert_eq!(std::fs::read(&dest).unwrap(), b"BACKUP-ARCHIVE");
    assert!(String::from_utf8_lossy(&output.stderr).contains("14 bytes"));
}
