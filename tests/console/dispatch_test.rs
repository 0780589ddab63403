//! Dispatch through the public console API.

use super::common::{console, messages};
use cmdeck::commands::{CommandDescriptor, CommandGroup, DispatchError, Invocation};
use cmdeck::log::LogLevel;
use pretty_assertions::assert_eq;

#[test]
fn test_overload_selected_by_argument_count() {
    let mut console = console();

    console.execute("x set 5").unwrap();
    console.execute("x set 5 6").unwrap();

    assert_eq!(
        messages(&console),
        vec!["x set 5", "set 5", "x set 5 6", "set 5 6"]
    );
}

#[test]
fn test_prefix_and_command_ignore_case() {
    let mut console = console();
    let outcome = console.execute("  X SeT 7");
    // Leading spaces produce empty tokens, so the prefix is empty
    assert!(matches!(outcome, Err(DispatchError::NoSuchContainer(_))));

    let outcome = console.execute("X SeT 7");
    assert_eq!(
        outcome,
        Ok(Invocation {
            prefix: "x".to_string(),
            command: Some("set".to_string()),
        })
    );
}

#[test]
fn test_non_ascii_command_ignores_case() {
    let mut console = console();
    console.add_container(CommandGroup::new("Wut").command(
        CommandDescriptor::new("Ärger"),
        |ctx, _| {
            ctx.print("grr");
            Ok(())
        },
    ));

    console.execute("WUT ÄRGER").unwrap();
    console.execute("wut ärger").unwrap();
    assert_eq!(
        messages(&console),
        vec!["WUT ÄRGER", "grr", "wut ärger", "grr"]
    );
}

#[test]
fn test_unknown_prefix_logs_error() {
    let mut console = console();
    let outcome = console.execute("nothere go");

    assert_eq!(
        outcome,
        Err(DispatchError::NoSuchContainer("nothere".to_string()))
    );
    let levels: Vec<_> = console.sink().entries().map(|e| e.level).collect();
    assert_eq!(levels, vec![LogLevel::Command, LogLevel::Error]);
}

#[test]
fn test_wrong_argument_types() {
    let mut console = console();
    let outcome = console.execute("x set five");
    assert!(matches!(outcome, Err(DispatchError::BadArguments { .. })));

    let outcome = console.execute("x set 1 2 3");
    assert!(matches!(outcome, Err(DispatchError::BadArguments { .. })));
}

#[test]
fn test_integer_out_of_range_is_rejected() {
    let mut console = console();
    let outcome = console.execute("x set 4294967296");
    assert!(matches!(outcome, Err(DispatchError::BadArguments { .. })));
}

#[test]
fn test_hidden_command_toggle() {
    let mut console = console();
    assert!(console.execute("x secret").is_ok());

    console.settings_mut().execute_hidden_commands = false;
    assert!(matches!(
        console.execute("x secret"),
        Err(DispatchError::NoSuchCommand { .. })
    ));
}

#[test]
fn test_replacing_container() {
    let mut console = console();
    console.add_container(CommandGroup::new("X").default_command(|ctx| {
        ctx.print("replaced");
        Ok(())
    }));

    assert_eq!(console.prefixes(), vec!["help", "x"]);
    assert!(matches!(
        console.execute("x set 1"),
        Err(DispatchError::NoSuchCommand { .. })
    ));
    console.execute("x").unwrap();
    assert_eq!(console.sink().last().map(|e| e.message.as_str()), Some("replaced"));
}

#[test]
fn test_removed_container_is_unknown() {
    let mut console = console();
    assert!(console.remove_container("x"));
    assert_eq!(
        console.execute("x set 1"),
        Err(DispatchError::NoSuchContainer("x".to_string()))
    );
}

#[test]
fn test_failure_message_and_trace() {
    let mut console = console();
    console.add_container(CommandGroup::new("bad").default_command(|_| Err(anyhow::anyhow!(""))));
    console.settings_mut().stack_trace = false;

    let outcome = console.execute("bad");
    assert_eq!(
        outcome,
        Err(DispatchError::InvocationFailed {
            message: "Unknown error".to_string(),
            trace: None,
        })
    );
}
