//! Integration tests for the binary's headless and exec modes.

use super::common::run_binary;

#[test]
fn test_headless_basic_execution() {
    let (code, stdout, _) = run_binary(&["--headless", "--events", "key:esc"]);

    assert_eq!(code, 0, "Expected exit code 0");
    assert!(
        stdout.contains("Events: 1 executed"),
        "Should show events executed"
    );
}

#[test]
fn test_headless_completion_and_execution() {
    let (code, stdout, _) = run_binary(&[
        "--headless",
        "--events",
        "type:ma,key:tab,key:space,type:add 2 40,key:enter,assert:contains:42",
        "--output",
        "json",
    ]);

    assert_eq!(code, 0, "stdout: {stdout}");
    assert!(stdout.contains(r#""passed": 1"#));
    assert!(stdout.contains(r#""failed": 0"#));
}

#[test]
fn test_headless_assertion_fail() {
    let (code, stdout, _) = run_binary(&[
        "--headless",
        "--events",
        "type:hello,assert:contains:goodbye",
        "--output",
        "json",
    ]);

    assert_eq!(code, 1, "Should exit with code 1 on assertion failure");
    assert!(stdout.contains(r#""failed": 1"#));
}

#[test]
fn test_headless_requires_events() {
    let (code, _, stderr) = run_binary(&["--headless"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("requires --events or --script"));
}

#[test]
fn test_exec_lines() {
    let (code, stdout, _) = run_binary(&["--exec", "math add 1 2", "--exec", "sys toggle vsync true"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("> math add 1 2\n3"));
    assert!(stdout.contains("vsync = true"));
}

#[test]
fn test_exec_failure_sets_exit_code() {
    let (code, stdout, _) = run_binary(&["--exec", "math div 1 0"]);
    assert_eq!(code, 1);
    assert!(stdout.contains("cannot divide"));
}

#[test]
fn test_show_hidden_flag() {
    let (_, stdout, _) = run_binary(&["--show-hidden", "--exec", "help"]);
    assert!(stdout.contains("secret()"));

    let (_, stdout, _) = run_binary(&["--exec", "help"]);
    assert!(!stdout.contains("secret()"));
}
