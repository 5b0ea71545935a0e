//! Integration tests for the `gridlead` CLI binary.
//!
//! These tests run the CLI as a subprocess and check exit codes and
//! stdout. HTTP delivery is only exercised against a closed port.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::net::TcpListener;
use std::path::Path;
use std::process::Command;

const ADA: [&str; 7] = [
    "--name",
    "Ada",
    "--email",
    "ada@x.com",
    "--usecase",
    "index search",
    "--consent",
];

/// Helper: locate the `gridlead` binary built by `cargo test`.
fn gridlead_bin() -> String {
    let path = env!("CARGO_BIN_EXE_gridlead");
    assert!(
        Path::new(path).exists(),
        "gridlead binary not found at {path}"
    );
    path.to_owned()
}

/// Helper: run gridlead with args and return (`exit_code`, stdout, stderr).
fn run(args: &[&str]) -> (i32, String, String) {
    run_with_env(args, &[])
}

/// Helper: like [`run`], with extra `GRIDLEAD_*` variables set.
fn run_with_env(args: &[&str], env: &[(&str, &str)]) -> (i32, String, String) {
    let mut cmd = Command::new(gridlead_bin());
    for key in [
        "GRIDLEAD_DELIVERY",
        "GRIDLEAD_ENDPOINT",
        "GRIDLEAD_RECIPIENT",
        "GRIDLEAD_PRODUCT",
        "GRIDLEAD_SOURCE",
        "GRIDLEAD_CONFIRM_DELAY_MS",
        "GRIDLEAD_HTTP_TIMEOUT_SECS",
        "GRIDLEAD_LOG",
    ] {
        cmd.env_remove(key);
    }
    for (key, value) in env {
        cmd.env(key, value);
    }
    let output = cmd.args(args).output().expect("failed to execute gridlead");

    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    format!("http://{}/leads", listener.local_addr().unwrap())
}

fn with_ada<'a>(prefix: &[&'a str]) -> Vec<&'a str> {
    let mut args = prefix.to_vec();
    args.extend_from_slice(&ADA);
    args
}

// ── Version & help ───────────────────────────────────────────────────

#[test]
fn test_version_flag() {
    let (code, stdout, _) = run(&["--version"]);
    assert_eq!(code, 0, "gridlead --version should exit 0");
    assert!(stdout.contains("gridlead"), "{stdout}");
}

#[test]
fn test_help_lists_commands() {
    let (code, stdout, _) = run(&["--help"]);
    assert_eq!(code, 0);
    for command in ["submit", "compose", "validate", "timelines"] {
        assert!(stdout.contains(command), "help should list '{command}'");
    }
    assert!(stdout.contains("GRIDLEAD_DELIVERY"));
}

#[test]
fn test_unknown_confirm_mode_is_a_usage_error() {
    let (code, _, stderr) = run(&with_ada(&["submit", "--confirm", "maybe"]));
    assert_eq!(code, 2, "clap usage errors exit 2");
    assert!(stderr.contains("maybe"), "{stderr}");
}

// ── validate ─────────────────────────────────────────────────────────

#[test]
fn test_validate_complete_request() {
    let (code, stdout, _) = run(&with_ada(&["validate"]));
    assert_eq!(code, 0, "{stdout}");
    assert!(stdout.contains("complete"));
}

#[test]
fn test_validate_without_consent_fails() {
    let (code, stdout, _) = run(&[
        "validate", "--name", "Ada", "--email", "ada@x.com", "--usecase", "x",
    ]);
    assert_eq!(code, 1);
    assert!(stdout.contains("You must allow us to contact you to submit."));
    assert!(!stdout.contains("Please enter your full name."));
}

#[test]
fn test_validate_json_reports_every_violation() {
    let (code, stdout, _) = run(&["validate", "--email", "not-an-email", "--json"]);
    assert_eq!(code, 1);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["valid"], false);
    assert_eq!(value["errors"]["email"], "Please enter a valid email address.");
    assert_eq!(value["errors"]["name"], "Please enter your full name.");
    assert!(value["errors"]["usecase"].is_string());
    assert!(value["errors"]["consent"].is_string());
    assert!(value["errors"].get("role").is_none());
}

// ── compose ──────────────────────────────────────────────────────────

#[test]
fn test_compose_prints_mailto_uri() {
    let (code, stdout, _) = run(&with_ada(&["compose", "--body"]));
    assert_eq!(code, 0, "{stdout}");
    assert!(stdout.contains("mailto:info@pressmedia.haus?subject=The%20Grid"));
    assert!(stdout.contains("Submitted via payprofitlearn.com lead form."));
}

#[test]
fn test_compose_json_with_custom_recipient() {
    let (code, stdout, _) = run(&with_ada(&[
        "compose",
        "--json",
        "--recipient",
        "sales@example.com",
    ]));
    assert_eq!(code, 0);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["to"], "sales@example.com");
    assert_eq!(value["subject"], "The Grid – Early Access Request (Ada)");
    assert!(value["uri"].as_str().unwrap().starts_with("mailto:sales@example.com?"));
}

#[test]
fn test_compose_refuses_incomplete_request() {
    let (code, stdout, _) = run(&["compose", "--name", "Ada"]);
    assert_eq!(code, 1);
    assert!(!stdout.contains("mailto:"));
}

// ── timelines ────────────────────────────────────────────────────────

#[test]
fn test_timelines_lists_options() {
    let (code, stdout, _) = run(&["timelines"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Immediately"));
    assert!(stdout.contains("Just exploring"));
}

// ── submit ───────────────────────────────────────────────────────────

#[test]
fn test_submit_mailto_confirmed_sent() {
    let (code, stdout, _) = run(&with_ada(&[
        "submit",
        "--confirm",
        "sent",
        "--confirm-delay-ms",
        "0",
    ]));
    assert_eq!(code, 0, "{stdout}");
    assert!(stdout.contains("mailto:info@pressmedia.haus?subject="));
    assert!(stdout.contains("Thanks, Ada!"));
}

#[test]
fn test_submit_mailto_could_not_send_exits_1() {
    let (code, stdout, _) = run(&with_ada(&[
        "submit",
        "--confirm",
        "failed",
        "--confirm-delay-ms",
        "0",
    ]));
    assert_eq!(code, 1);
    assert!(stdout.contains("No problem."), "{stdout}");
    assert!(!stdout.contains("Thanks, Ada!"));
}

#[test]
fn test_submit_rejected_request_exits_1() {
    let (code, stdout, _) = run(&["submit", "--name", "Ada", "--confirm", "skip"]);
    assert_eq!(code, 1);
    assert!(stdout.contains("Please complete required fields and confirm consent."));
    assert!(!stdout.contains("mailto:"));
}

#[test]
fn test_submit_http_to_closed_port_fails() {
    let endpoint = closed_endpoint();
    let (code, stdout, _) = run(&with_ada(&[
        "submit",
        "--delivery",
        "http",
        "--endpoint",
        endpoint.as_str(),
    ]));
    assert_eq!(code, 1);
    assert!(stdout.contains("Sorry, something went wrong"), "{stdout}");
    assert!(stdout.contains("info@pressmedia.haus"));
}

#[test]
fn test_submit_http_without_endpoint_is_an_error() {
    let (code, _, stderr) = run(&with_ada(&["submit", "--delivery", "http"]));
    assert_eq!(code, 1);
    assert!(stderr.contains("invalid delivery settings"), "{stderr}");
}

// ── Environment vs. flags ────────────────────────────────────────────

#[test]
fn test_endpoint_flag_completes_http_delivery_from_env() {
    let endpoint = closed_endpoint();
    let (code, stdout, stderr) = run_with_env(
        &with_ada(&["submit", "--endpoint", endpoint.as_str()]),
        &[("GRIDLEAD_DELIVERY", "http")],
    );
    assert_eq!(code, 1, "the closed port still fails the delivery");
    assert!(!stderr.contains("needs an endpoint"), "{stderr}");
    assert!(stdout.contains("Sending your request"), "{stdout}");
    assert!(stdout.contains("Sorry, something went wrong"), "{stdout}");
}

#[test]
fn test_delivery_flag_uses_endpoint_from_env() {
    let endpoint = closed_endpoint();
    let (code, stdout, stderr) = run_with_env(
        &with_ada(&["submit", "--delivery", "http"]),
        &[("GRIDLEAD_ENDPOINT", endpoint.as_str())],
    );
    assert_eq!(code, 1);
    assert!(!stderr.contains("invalid delivery settings"), "{stderr}");
    assert!(stdout.contains("Sending your request"), "{stdout}");
}

#[test]
fn test_incomplete_delivery_env_leaves_other_commands_alone() {
    let env = [("GRIDLEAD_DELIVERY", "http")];

    let (code, stdout, stderr) = run_with_env(&["timelines"], &env);
    assert_eq!(code, 0, "{stderr}");
    assert!(stdout.contains("Immediately"));

    let (code, _, stderr) = run_with_env(&with_ada(&["validate"]), &env);
    assert_eq!(code, 0, "{stderr}");

    let (code, stdout, stderr) = run_with_env(&with_ada(&["compose"]), &env);
    assert_eq!(code, 0, "{stderr}");
    assert!(stdout.contains("mailto:"));
}

#[test]
fn test_confirm_delay_flag_overrides_bad_env_value() {
    let env = [("GRIDLEAD_CONFIRM_DELAY_MS", "soon")];

    let (code, stdout, stderr) = run_with_env(
        &with_ada(&["submit", "--confirm", "sent", "--confirm-delay-ms", "0"]),
        &env,
    );
    assert_eq!(code, 0, "{stderr}");
    assert!(stdout.contains("Thanks, Ada!"), "{stdout}");

    let (code, _, stderr) = run_with_env(&with_ada(&["submit", "--confirm", "sent"]), &env);
    assert_ne!(code, 0);
    assert!(stderr.contains("soon"), "{stderr}");
}

#[test]
fn test_recipient_env_is_used_and_flag_wins() {
    let env = [("GRIDLEAD_RECIPIENT", "team@example.com")];

    let (code, stdout, _) = run_with_env(&with_ada(&["compose", "--json"]), &env);
    assert_eq!(code, 0);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["to"], "team@example.com");

    let (code, stdout, _) = run_with_env(
        &with_ada(&["compose", "--json", "--recipient", "sales@example.com"]),
        &env,
    );
    assert_eq!(code, 0);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["to"], "sales@example.com");
}
