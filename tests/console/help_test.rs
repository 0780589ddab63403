//! Built-in help output.

use super::common::{console, messages};
use cmdeck::commands::DispatchError;
use cmdeck::log::LogLevel;

#[test]
fn test_help_lists_every_container() {
    let mut console = console();
    console.execute("help").unwrap();

    let text = console.sink().to_text();
    assert!(text.contains("help:\n        print()\n        print(container:String)"));
    assert!(text.contains("x:\n        set(i32)\n        set(i32, i32)\n        name(who:String)"));
    assert!(!text.contains("secret"));
}

#[test]
fn test_help_print_matches_default() {
    let mut a = console();
    let mut b = console();
    a.execute("help").unwrap();
    b.execute("help print").unwrap();

    assert_eq!(messages(&a)[1..], messages(&b)[1..]);
}

#[test]
fn test_help_shows_hidden_when_enabled() {
    let mut console = console();
    console.settings_mut().display_hidden_commands = true;
    console.execute("help").unwrap();
    assert!(console.sink().to_text().contains("        secret()"));
}

#[test]
fn test_help_for_one_container() {
    let mut console = console();
    console.execute("help print X").unwrap();

    let last = console.sink().last().map(|e| e.message.clone()).unwrap_or_default();
    assert!(last.starts_with("Help for x:\n\n-set(i32):\nSets one value.\n     i32: the value"));
    assert!(last.contains("-name(who:String):"));
}

#[test]
fn test_help_for_one_container_includes_hidden() {
    let mut console = console();
    console.execute("help print x").unwrap();

    let last = console.sink().last().map(|e| e.message.clone()).unwrap_or_default();
    assert!(last.ends_with("\n\n-secret():"), "{last}");
}

#[test]
fn test_listed_but_not_executable() {
    let mut console = console();
    console.settings_mut().display_hidden_commands = true;
    console.settings_mut().execute_hidden_commands = false;

    console.execute("help").unwrap();
    assert!(console.sink().to_text().contains("        secret()"));

    assert!(matches!(
        console.execute("x secret"),
        Err(DispatchError::NoSuchCommand { .. })
    ));
    assert!(!messages(&console).contains(&"psst".to_string()));
}

#[test]
fn test_executable_but_not_listed() {
    let mut console = console();
    console.settings_mut().display_hidden_commands = false;
    console.settings_mut().execute_hidden_commands = true;

    console.execute("help").unwrap();
    assert!(!console.sink().to_text().contains("secret"));

    console.execute("x secret").unwrap();
    assert_eq!(messages(&console).last().map(String::as_str), Some("psst"));
}

#[test]
fn test_help_for_unknown_container() {
    let mut console = console();
    assert!(console.execute("help print nope").is_ok());
    assert_eq!(
        console.sink().last().map(|e| e.level),
        Some(LogLevel::Error)
    );
}
