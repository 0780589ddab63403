//! Common test utilities for console tests.

use cmdeck::commands::{CommandDescriptor, CommandGroup, ParamType};
use cmdeck::console::Console;
use cmdeck::log::ConsoleLog;
use std::process::Command;

/// A console with a small `x` container registered.
///
/// `x set` is overloaded on one and two integers; `x name` takes a string
/// with completion options; `x secret` is hidden.
pub fn console() -> Console {
    let mut console = Console::new(ConsoleLog::default());
    console.add_container(
        CommandGroup::new("x")
            .command(
                CommandDescriptor::new("set")
                    .params([ParamType::I32])
                    .doc("Sets one value.", ["the value"]),
                |ctx, args| {
                    ctx.print(format!("set {}", args[0]));
                    Ok(())
                },
            )
            .command(
                CommandDescriptor::new("set").params([ParamType::I32, ParamType::I32]),
                |ctx, args| {
                    ctx.print(format!("set {} {}", args[0], args[1]));
                    Ok(())
                },
            )
            .command(
                CommandDescriptor::new("name")
                    .params([ParamType::String])
                    .param_names(["who"])
                    .option(0, 1),
                |ctx, args| {
                    ctx.success(format!("hello {}", args[0]));
                    Ok(())
                },
            )
            .command(CommandDescriptor::new("secret").hidden(), |ctx, _| {
                ctx.print("psst");
                Ok(())
            })
            .options(|group| match group {
                1 => vec!["alice".to_string(), "albert".to_string(), "bob".to_string()],
                _ => Vec::new(),
            }),
    );
    console
}

/// Messages currently held by the console log.
pub fn messages(console: &Console) -> Vec<String> {
    console.sink().entries().map(|e| e.message.clone()).collect()
}

/// Runs the cmdeck binary with the given arguments and an empty config.
pub fn run_binary(args: &[&str]) -> (i32, String, String) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = dir.path().join("config.toml");

    let output = Command::new(env!("CARGO_BIN_EXE_cmdeck"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute command");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}
