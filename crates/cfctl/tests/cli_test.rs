//! Integration tests for the `cfctl` CLI binary.
//!
//! Argument parsing, help output, shell completions and error exit codes
//! run without any network. The end-to-end cases point `--api-url` at a
//! local wiremock server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `cfctl` binary with env isolation.
///
/// Clears every `CFCTL_*` and `CF_*` variable and points config
/// directories at a nonexistent path so tests never see real settings.
fn cfctl_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("cfctl");
    cmd.env("HOME", "/tmp/cfctl-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/cfctl-test-nonexistent")
        .env_remove("CFCTL_PROFILE")
        .env_remove("CFCTL_API_URL")
        .env_remove("CFCTL_OUTPUT")
        .env_remove("CFCTL_TIMEOUT")
        .env_remove("CF_API_TOKEN")
        .env_remove("CF_API_KEY")
        .env_remove("CF_API_EMAIL")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run the binary against `server` off the async runtime.
async fn run_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let mut cmd = cfctl_cmd();
    cmd.args(["--api-url", &format!("{}/client/v4/", server.uri())])
        .args(["--api-token", "test-token", "--output", "json", "--yes"])
        .args(args);
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

fn ok(result: serde_json::Value) -> serde_json::Value {
    json!({ "success": true, "errors": [], "messages": [], "result": result })
}

fn ok_page(result: serde_json::Value) -> serde_json::Value {
    let count = result.as_array().map_or(0, Vec::len);
    json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": result,
        "result_info": {
            "page": 1,
            "per_page": 100,
            "count": count,
            "total_count": count,
            "total_pages": 1
        }
    })
}

fn server_error() -> ResponseTemplate {
    ResponseTemplate::new(500).set_body_json(json!({
        "success": false,
        "errors": [{ "code": 10000, "message": "internal error" }],
        "messages": [],
        "result": null
    }))
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = cfctl_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    cfctl_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Cloudflare")
            .and(predicate::str::contains("zones"))
            .and(predicate::str::contains("dns"))
            .and(predicate::str::contains("firewall")),
    );
}

#[test]
fn test_version_flag() {
    cfctl_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cfctl"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    cfctl_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    cfctl_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cfctl"));
}

// ── Argument errors ─────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    cfctl_cmd()
        .arg("nonexistent")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_invalid_output_format() {
    let output = cfctl_cmd()
        .args(["--output", "xml", "zones", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("xml"));
}

#[test]
fn test_dns_upsert_requires_content() {
    cfctl_cmd()
        .args([
            "dns",
            "create-or-update",
            "--zone",
            "example.com",
            "--name",
            "www",
            "--type",
            "A",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--content"));
}

#[test]
fn test_unknown_rule_mode_rejected() {
    cfctl_cmd()
        .args([
            "firewall", "rules", "create", "--zone", "example.com", "--value", "10.0.0.1",
            "--mode", "allow",
        ])
        .assert()
        .code(2);
}

#[test]
fn test_user_agent_update_requires_mode_and_value() {
    cfctl_cmd()
        .args(["user-agents", "update", "--zone", "example.com", "--id", "ua1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--mode").and(predicate::str::contains("--value")));
}

#[test]
fn test_user_agent_page_starts_at_one() {
    cfctl_cmd()
        .args(["ua", "list", "--zone", "example.com", "--page", "0"])
        .assert()
        .code(2);
}

#[test]
fn test_origin_ca_algorithm_is_checked() {
    cfctl_cmd()
        .args(["origin-ca-root-cert", "--algorithm", "dsa"])
        .assert()
        .code(2);
}

#[test]
fn test_user_update_needs_a_field() {
    cfctl_cmd()
        .args(["user", "update"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("at least one field"));
}

// ── Scope validation (no network, no credentials) ───────────────────

#[test]
fn test_both_scopes_is_usage_error() {
    let output = cfctl_cmd()
        .args([
            "firewall",
            "rules",
            "create-or-update",
            "--zone",
            "example.com",
            "--account",
            "acc1",
            "--value",
            "198.51.100.4",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("Invalid scope"), "unexpected output:\n{text}");
}

#[test]
fn test_missing_scope_is_usage_error() {
    cfctl_cmd()
        .args(["firewall", "rules", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid scope"));
}

// ── Credentials ─────────────────────────────────────────────────────

#[test]
fn test_dns_list_without_credentials() {
    cfctl_cmd()
        .args(["dns", "list", "--zone", "example.com"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No credentials"));
}

#[test]
fn test_unknown_profile() {
    cfctl_cmd()
        .args(["--profile", "staging", "user", "info"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("staging"));
}

#[test]
fn test_config_show_no_config() {
    cfctl_cmd().args(["config", "show"]).assert().success();
}

// ── Subcommand discovery ────────────────────────────────────────────

#[test]
fn test_dns_subcommands_exist() {
    cfctl_cmd().args(["dns", "--help"]).assert().success().stdout(
        predicate::str::contains("list")
            .and(predicate::str::contains("create"))
            .and(predicate::str::contains("update"))
            .and(predicate::str::contains("delete"))
            .and(predicate::str::contains("create-or-update")),
    );
}

#[test]
fn test_firewall_rules_subcommands_exist() {
    cfctl_cmd()
        .args(["firewall", "rules", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("create-or-update"));
}

#[test]
fn test_user_agents_subcommands_exist() {
    cfctl_cmd().args(["user-agents", "--help"]).assert().success().stdout(
        predicate::str::contains("list")
            .and(predicate::str::contains("create"))
            .and(predicate::str::contains("update"))
            .and(predicate::str::contains("delete")),
    );
}

#[test]
fn test_pagerules_list_exists() {
    cfctl_cmd()
        .args(["pagerules", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_config_subcommands_exist() {
    cfctl_cmd().args(["config", "--help"]).assert().success().stdout(
        predicate::str::contains("init")
            .and(predicate::str::contains("show"))
            .and(predicate::str::contains("profiles"))
            .and(predicate::str::contains("set-token")),
    );
}

// ── End to end against a mock API ───────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_ips_need_no_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/client/v4/ips"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!({
            "ipv4_cidrs": ["173.245.48.0/20", "103.21.244.0/22"],
            "ipv6_cidrs": ["2400:cb00::/32"],
            "etag": "abc"
        }))))
        .mount(&server)
        .await;

    let mut cmd = cfctl_cmd();
    cmd.args(["--api-url", &format!("{}/client/v4/", server.uri())])
        .args(["ips", "--ip-type", "ipv4", "--ip-only"]);
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "173.245.48.0/20\n103.21.244.0/22\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dns_upsert_updates_existing_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/client/v4/zones"))
        .and(query_param("name", "example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_page(json!([
            { "id": "z1", "name": "example.com", "status": "active" }
        ]))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/client/v4/zones/z1/dns_records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_page(json!([
            { "id": "d1", "name": "www.example.com", "type": "A", "content": "192.0.2.1", "ttl": 300 }
        ]))))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/client/v4/zones/z1/dns_records/d1"))
        .and(body_json(json!({
            "type": "A",
            "content": "192.0.2.10",
            "ttl": 1,
            "proxied": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!({
            "id": "d1", "name": "www.example.com", "type": "A", "content": "192.0.2.10", "ttl": 1
        }))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_against(
        &server,
        &[
            "dns",
            "create-or-update",
            "--zone",
            "example.com",
            "--name",
            "www",
            "--type",
            "A",
            "--content",
            "192.0.2.10",
        ],
    )
    .await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("192.0.2.10"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_access_rule_partial_failure_exit_code() {
    let server = MockServer::start().await;
    let rules = "/client/v4/accounts/acc1/firewall/access_rules/rules";
    let rule = |id: &str| {
        json!({
            "id": id,
            "configuration": { "target": "ip", "value": "198.51.100.4" },
            "mode": "challenge",
            "notes": "",
            "scope": { "id": "acc1", "type": "account" }
        })
    };
    Mock::given(method("GET"))
        .and(path("/client/v4/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_page(json!([]))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(rules))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok_page(json!([rule("r1"), rule("r2")]))),
        )
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("{rules}/r1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(rule("r1"))))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("{rules}/r2")))
        .respond_with(server_error())
        .mount(&server)
        .await;

    let output = run_against(
        &server,
        &[
            "firewall",
            "rules",
            "create-or-update",
            "--account",
            "acc1",
            "--value",
            "198.51.100.4",
            "--notes",
            "reviewed",
        ],
    )
    .await;

    assert_eq!(output.status.code(), Some(6), "{}", combined_output(&output));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("r2"), "failure not reported:\n{stderr}");
    assert!(stderr.contains("Updated 1 of 2 access rules"));
}

async fn mount_zone(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/client/v4/zones"))
        .and(query_param("name", "example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_page(json!([
            { "id": "z1", "name": "example.com", "status": "active" }
        ]))))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_pagerules_list_reports_settings() {
    let server = MockServer::start().await;
    mount_zone(&server).await;
    Mock::given(method("GET"))
        .and(path("/client/v4/zones/z1/pagerules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!([{
            "id": "p1",
            "priority": 1,
            "status": "active",
            "targets": [{ "target": "url", "constraint": { "operator": "matches", "value": "example.com/*" } }],
            "actions": [{ "id": "cache_level", "value": "cache_everything" }]
        }]))))
        .mount(&server)
        .await;

    let output = run_against(&server, &["pagerules", "list", "--zone", "example.com"]).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let rules: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rules[0]["url_pattern"], "example.com/*");
    assert_eq!(rules[0]["actions"][0]["value"]["value"], "cache_everything");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_user_agent_create_sends_ua_target() {
    let server = MockServer::start().await;
    mount_zone(&server).await;
    Mock::given(method("POST"))
        .and(path("/client/v4/zones/z1/firewall/ua_rules"))
        .and(body_json(json!({
            "mode": "block",
            "configuration": { "target": "ua", "value": "BadBot/1.0" },
            "paused": false,
            "description": "scraper"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!({
            "id": "ua1",
            "description": "scraper",
            "mode": "block",
            "configuration": { "target": "ua", "value": "BadBot/1.0" },
            "paused": false
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(
        &server,
        &[
            "user-agents",
            "create",
            "--zone",
            "example.com",
            "--mode",
            "block",
            "--value",
            "BadBot/1.0",
            "--description",
            "scraper",
        ],
    )
    .await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("\"user_agent\": \"BadBot/1.0\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_origin_ca_root_prints_bare_pem() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/client/v4/cert_req"))
        .and(query_param("certificate_chain_type", "rsa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!({
            "certificate": "\n-----BEGIN CERTIFICATE-----\nMIIE\n-----END CERTIFICATE-----\n\n"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = cfctl_cmd();
    cmd.args(["--api-url", &format!("{}/client/v4/", server.uri())])
        .args(["--api-token", "test-token"])
        .args(["origin-ca-root-cert", "--algorithm", "rsa"]);
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "-----BEGIN CERTIFICATE-----\nMIIE\n-----END CERTIFICATE-----\n"
    );
}
