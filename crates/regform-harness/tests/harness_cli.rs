#![forbid(unsafe_code)]

//! End-to-end tests for the `regform-harness` binary.
//!
//! Each test pipes a script through the compiled binary and inspects the
//! JSON report on stdout.
//!
//! Run: `cargo test -p regform-harness --test harness_cli`

use std::io::Write;
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;

const VALID_SESSION: &str = "\
{\"type\":\"input\",\"field\":\"username\",\"value\":\"user_1\"}
{\"type\":\"input\",\"field\":\"nickname\",\"value\":\"Bob\"}
{\"type\":\"input\",\"field\":\"password\",\"value\":\"abcdef\"}
{\"type\":\"input\",\"field\":\"confirmPassword\",\"value\":\"abcdef\"}
{\"type\":\"submit\"}
{\"type\":\"advance\",\"ms\":500}
";

fn harness(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_regform-harness"))
        .args(args)
        .env_remove("REGFORM_SUBMIT_DELAY_MS")
        .env_remove("REGFORM_LOCALE")
        .env_remove("REGFORM_HIGHLIGHT_MISSING")
        .env_remove("RUST_LOG")
        .env("LC_ALL", "C")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn harness");
    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(stdin.as_bytes())
        .expect("write script");
    child.wait_with_output().expect("harness exits")
}

fn report(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn valid_session_submits_once() {
    let json = report(&harness(&[], VALID_SESSION));
    assert_eq!(json["state"], "submitting");
    assert_eq!(json["submissions"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["submissions"][0]["username"], "user_1");
    assert_eq!(json["page"]["submit"]["disabled"], true);
}

#[test]
fn longer_delay_flag_holds_the_submit() {
    let json = report(&harness(&["--delay-ms=1000"], VALID_SESSION));
    assert_eq!(json["submissions"].as_array().map(Vec::len), Some(0));
}

#[test]
fn locale_flag_switches_messages() {
    let script = "{\"type\":\"input\",\"field\":\"password\",\"value\":\"abc\"}\n";
    let json = report(&harness(&["--locale=zh-CN"], script));
    assert_eq!(json["page"]["fields"][2]["errors"][0], "密码至少需要6个字符");
}

#[test]
fn malformed_script_fails_with_line_number() {
    let output = harness(&[], "{\"type\":\"submit\"}\nnot json\n");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("line 2"));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let output = harness(&["--bogus"], "");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn help_goes_to_stdout() {
    let output = harness(&["--help"], "");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--script=PATH"));
}
