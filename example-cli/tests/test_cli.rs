//! Integration tests for the example CLI.
//!
//! The first half dispatches through the library; the second half runs
//! the real binary to check output streams and exit codes.

use assert_cmd::Command;
use cli_dispatch::{DispatchError, FlagError, ResolveError};
use example_cli::build_app;
use predicates::prelude::*;

fn run_lib(args: &[&str]) -> (Result<(), DispatchError>, String) {
    // ---
    let app = build_app("1.0.0-test").expect("tree is valid");
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();

    let mut out = Vec::new();
    // Empty environment so a stray EXAMPLE_CLI_NAME cannot leak in.
    let result = app.run_with_env(&args, &mut out, &|_: &str| None::<String>);
    (result, String::from_utf8(out).expect("output is utf8"))
}

fn bin() -> Command {
    // ---
    let mut cmd = Command::cargo_bin("example-cli").expect("binary is built");
    cmd.env_remove("EXAMPLE_CLI_NAME").env_remove("RUST_LOG");
    cmd
}

/// `--name World` produces exactly the greeting line.
#[test]
fn test_hello_world() {
    // ---
    let (result, out) = run_lib(&["hello", "--name", "World", "--color", "never"]);
    result.expect("hello runs");
    assert_eq!(out, "Hello World!!\n");
}

/// Missing `--name` never reaches the handler.
#[test]
fn test_hello_requires_name() {
    // ---
    let (result, out) = run_lib(&["hello"]);
    assert!(matches!(
        result,
        Err(DispatchError::Flag(FlagError::MissingRequired { ref flag, .. })) if flag == "--name"
    ));
    assert!(out.is_empty());
}

/// Typos in the command name are resolution errors.
#[test]
fn test_unknown_command() {
    // ---
    let (result, _) = run_lib(&["helo", "--name", "World"]);
    assert!(matches!(
        result,
        Err(DispatchError::Resolve(ResolveError::UnknownCommand { .. }))
    ));
}

/// Identical arguments give identical output.
#[test]
fn test_hello_is_idempotent() {
    // ---
    let args = ["hello", "--name", "World", "--color", "never"];
    let (first_result, first) = run_lib(&args);
    let (second_result, second) = run_lib(&args);
    first_result.expect("first run");
    second_result.expect("second run");
    assert_eq!(first, second);
}

/// One line per foreground color, plain when colors are off.
#[test]
fn test_demo_colors_plain() {
    // ---
    let (result, out) = run_lib(&["demo", "colors", "--color", "never"]);
    result.expect("colors runs");

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 16);
    assert_eq!(lines[0], "FgBlack");
    assert_eq!(lines[1], "FgRed");
    assert!(!out.contains('\x1b'));
}

/// `--color always` forces escape codes even into a buffer.
#[test]
fn test_demo_colors_forced() {
    // ---
    let (result, out) = run_lib(&[
        "demo", "colors", "--text", "sample", "--bold", "--color", "always",
    ]);
    result.expect("colors runs");
    assert!(out.contains("\x1b["));
    assert_eq!(out.matches("sample").count(), 16);
}

/// The binary prints the greeting on stdout and exits 0.
#[test]
fn test_binary_hello() {
    // ---
    bin()
        .args(["hello", "--name", "World"])
        .assert()
        .success()
        .stdout("Hello World!!\n");
}

/// The environment fallback works through the real process.
#[test]
fn test_binary_hello_from_env() {
    // ---
    bin()
        .arg("hello")
        .env("EXAMPLE_CLI_NAME", "Env")
        .assert()
        .success()
        .stdout("Hello Env!!\n");
}

/// Usage errors exit with 2 and explain themselves on stderr.
#[test]
fn test_binary_usage_errors() {
    // ---
    bin()
        .arg("hello")
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("missing required flag --name"));

    bin()
        .arg("nope")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown command \"nope\""));
}

/// `version` reports the Cargo package version.
#[test]
fn test_binary_version() {
    // ---
    bin()
        .arg("version")
        .assert()
        .success()
        .stdout(format!("{}\n", env!("CARGO_PKG_VERSION")));
}

/// Help goes to stdout and succeeds.
#[test]
fn test_binary_help() {
    // ---
    bin()
        .args(["--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello").and(predicate::str::contains("demo")));

    bin()
        .args(["hello", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[env: EXAMPLE_CLI_NAME]"));
}
