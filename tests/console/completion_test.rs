//! Autocompletion through the public console API.

use super::common::console;
use pretty_assertions::assert_eq;

/// Presses tab `times` times, feeding each result back as the input line.
fn press_tab(console: &mut cmdeck::console::Console, line: &str, times: usize) -> Vec<String> {
    let mut line = line.to_string();
    let mut seen = Vec::new();
    for _ in 0..times {
        line = console.complete(&line);
        seen.push(line.clone());
    }
    seen
}

#[test]
fn test_prefix_completion() {
    let mut console = console();
    assert_eq!(press_tab(&mut console, "h", 2), vec!["help", "h"]);
}

#[test]
fn test_command_completion_deduplicates_overloads() {
    let mut console = console();
    assert_eq!(
        press_tab(&mut console, "x s", 3),
        vec!["x secret", "x set", "x s"]
    );
}

#[test]
fn test_parameter_completion_cycles() {
    let mut console = console();
    assert_eq!(
        press_tab(&mut console, "x name al", 4),
        vec!["x name albert", "x name alice", "x name al", "x name albert"]
    );
}

#[test]
fn test_help_completes_registered_prefixes() {
    let mut console = console();
    assert_eq!(
        press_tab(&mut console, "help print ", 3),
        vec!["help print help", "help print x", "help print "]
    );
}

#[test]
fn test_no_candidates_returns_line() {
    let mut console = console();
    assert_eq!(press_tab(&mut console, "x set 1 ", 2), vec!["x set 1 ", "x set 1 "]);
}

#[test]
fn test_editing_line_starts_new_session() {
    let mut console = console();
    assert_eq!(console.complete("x name a"), "x name albert");
    assert_eq!(console.complete("x name b"), "x name bob");
}

#[test]
fn test_execute_resets_completion() {
    let mut console = console();
    console.complete("x s");
    assert!(!console.completer().is_new());

    let _ = console.execute("x set 1");
    assert!(console.completer().is_new());
}
