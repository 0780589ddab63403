//! Command dispatch: resolves an input line to one command overload and runs it.
//!
//! Resolution order:
//! 1. The first token names a container (case-insensitive)
//! 2. The second token names a command; without it the container's default runs
//! 3. Every token after the second is a raw argument
//! 4. Same-named commands are tried in registration order; the first whose
//!    parameters accept the arguments is invoked

use thiserror::Error;
use tracing::{debug, warn};

use super::container::CommandContext;
use super::registry::{normalize, Registry};
use super::tokenizer::split_line;
use crate::config::ConsoleSettings;
use crate::log::{LogLevel, LogSink};

/// A successfully invoked command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Normalized container prefix.
    pub prefix: String,
    /// Name of the invoked command, `None` for a container's default operation.
    pub command: Option<String>,
}

/// Why a line could not be executed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The console is disabled and ignores input.
    #[error("Console is disabled")]
    Disabled,

    /// No container is registered under the prefix.
    #[error("No command container named '{0}'")]
    NoSuchContainer(String),

    /// No executable command matched, or no default operation exists.
    #[error("{}", no_such_command(.prefix, .command.as_deref()))]
    NoSuchCommand {
        prefix: String,
        command: Option<String>,
    },

    /// Every same-named command rejected the arguments.
    #[error("Bad arguments for '{prefix} {command}': no overload accepts {arguments:?}")]
    BadArguments {
        prefix: String,
        command: String,
        arguments: Vec<String>,
    },

    /// The operation ran and failed.
    #[error("{message}")]
    InvocationFailed {
        message: String,
        /// Causal chain and backtrace, when stack traces are enabled.
        trace: Option<String>,
    },
}

fn no_such_command(prefix: &str, command: Option<&str>) -> String {
    match command {
        Some(command) => format!("No command '{command}' in '{prefix}'"),
        None => format!("'{prefix}' has no default command"),
    }
}

/// Result of dispatching one line.
pub type DispatchOutcome = Result<Invocation, DispatchError>;

/// Dispatches one input line.
///
/// The line is recorded at `COMMAND` level before resolution; failures are
/// recorded at `ERROR` level. The registry is never modified.
pub fn dispatch(
    registry: &Registry,
    settings: &ConsoleSettings,
    sink: &mut dyn LogSink,
    line: &str,
) -> DispatchOutcome {
    sink.record(line, LogLevel::Command);

    let outcome = resolve_and_invoke(registry, settings, sink, line);
    if let Err(err) = &outcome {
        report(sink, err);
    }
    outcome
}

fn report(sink: &mut dyn LogSink, err: &DispatchError) {
    sink.record(&err.to_string(), LogLevel::Error);
    if let DispatchError::InvocationFailed {
        trace: Some(trace), ..
    } = err
    {
        sink.record(trace, LogLevel::Error);
    }
}

fn resolve_and_invoke(
    registry: &Registry,
    settings: &ConsoleSettings,
    sink: &mut dyn LogSink,
    line: &str,
) -> DispatchOutcome {
    let tokens = split_line(line);
    let prefix = tokens.first().map(|t| normalize(t)).unwrap_or_default();

    let container = registry
        .lookup(&prefix)
        .ok_or_else(|| DispatchError::NoSuchContainer(prefix.clone()))?;
    let mut ctx = CommandContext::new(registry, settings, sink);

    let Some(command) = tokens.get(1).map(|t| t.trim().to_lowercase()) else {
        if !container.has_default() {
            return Err(DispatchError::NoSuchCommand {
                prefix,
                command: None,
            });
        }
        debug!(prefix = %prefix, "Invoking default command");
        container
            .invoke_default(&mut ctx)
            .map_err(|e| invocation_failed(&e, settings.stack_trace))?;
        return Ok(Invocation {
            prefix,
            command: None,
        });
    };

    // Fixed offset: arguments always start at the third token.
    let arguments: Vec<&str> = tokens.iter().skip(2).copied().collect();

    let candidates: Vec<_> = container
        .commands()
        .iter()
        .enumerate()
        .filter(|(_, cmd)| cmd.matches_name(&command))
        .filter(|(_, cmd)| settings.execute_hidden_commands || !cmd.is_hidden())
        .collect();

    if candidates.is_empty() {
        return Err(DispatchError::NoSuchCommand {
            prefix,
            command: Some(command),
        });
    }

    debug!(
        prefix = %prefix,
        command = %command,
        candidates = candidates.len(),
        arguments = arguments.len(),
        "Resolving command"
    );

    for (index, cmd) in candidates {
        let Some(values) = cmd.resolve_arguments(&arguments) else {
            continue;
        };

        debug!(index, signature = %cmd.signature(), "Invoking command");
        container
            .invoke(index, &mut ctx, &values)
            .map_err(|e| invocation_failed(&e, settings.stack_trace))?;
        return Ok(Invocation {
            prefix,
            command: Some(cmd.name().to_string()),
        });
    }

    Err(DispatchError::BadArguments {
        prefix,
        command,
        arguments: arguments.iter().map(|a| a.to_string()).collect(),
    })
}

fn invocation_failed(err: &anyhow::Error, with_trace: bool) -> DispatchError {
    warn!(error = %err, "Command failed");

    let mut message = err.to_string();
    if message.is_empty() {
        message = "Unknown error".to_string();
    }

    DispatchError::InvocationFailed {
        message,
        trace: with_trace.then(|| format!("{err:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::container::CommandGroup;
    use crate::commands::descriptor::{CommandDescriptor, ParamType, Value};
    use crate::log::ConsoleLog;
    use anyhow::Context;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Calls = Rc<RefCell<Vec<String>>>;

    fn recorder(
        calls: &Calls,
        tag: &'static str,
    ) -> impl Fn(&mut CommandContext<'_>, &[Value]) -> anyhow::Result<()> {
        let calls = Rc::clone(calls);
        move |_, args| {
            let rendered: Vec<String> = args.iter().map(|a| a.to_string()).collect();
            calls.borrow_mut().push(format!("{tag}({})", rendered.join(",")));
            Ok(())
        }
    }

    fn registry_with(calls: &Calls) -> Registry {
        let calls_default = Rc::clone(calls);
        let group = CommandGroup::new("x")
            .command(
                CommandDescriptor::new("set").params([ParamType::I32]),
                recorder(calls, "set1"),
            )
            .command(
                CommandDescriptor::new("set").params([ParamType::I32, ParamType::I32]),
                recorder(calls, "set2"),
            )
            .command(
                CommandDescriptor::new("flag").params([ParamType::Bool]),
                recorder(calls, "flag"),
            )
            .command(CommandDescriptor::new("secret").hidden(), recorder(calls, "secret"))
            .command(CommandDescriptor::new("boom"), |_, _| {
                Err(anyhow::anyhow!("disk on fire")).context("boom failed")
            })
            .default_command(move |_| {
                calls_default.borrow_mut().push("default".to_string());
                Ok(())
            });

        let mut registry = Registry::new();
        registry.add(group);
        registry.add(
            CommandGroup::new("nodefault")
                .command(CommandDescriptor::new("go"), recorder(calls, "go")),
        );
        registry
    }

    fn run(line: &str, settings: &ConsoleSettings) -> (DispatchOutcome, Vec<String>, ConsoleLog) {
        let calls: Calls = Rc::default();
        let registry = registry_with(&calls);
        let mut log = ConsoleLog::default();
        let outcome = dispatch(&registry, settings, &mut log, line);
        let calls = calls.borrow().clone();
        (outcome, calls, log)
    }

    #[test]
    fn test_default_command() {
        let (outcome, calls, _) = run("x", &ConsoleSettings::default());
        assert_eq!(
            outcome,
            Ok(Invocation {
                prefix: "x".to_string(),
                command: None
            })
        );
        assert_eq!(calls, vec!["default"]);
    }

    #[test]
    fn test_trailing_space_still_runs_default() {
        let (outcome, calls, _) = run("X ", &ConsoleSettings::default());
        assert!(outcome.is_ok());
        assert_eq!(calls, vec!["default"]);
    }

    #[test]
    fn test_missing_default() {
        let (outcome, _, _) = run("nodefault", &ConsoleSettings::default());
        assert_eq!(
            outcome,
            Err(DispatchError::NoSuchCommand {
                prefix: "nodefault".to_string(),
                command: None
            })
        );
    }

    #[test]
    fn test_unknown_container() {
        let (outcome, calls, _) = run("unknownprefix bar", &ConsoleSettings::default());
        assert_eq!(
            outcome,
            Err(DispatchError::NoSuchContainer("unknownprefix".to_string()))
        );
        assert!(calls.is_empty());
    }

    #[test]
    fn test_unknown_command() {
        let (outcome, _, _) = run("x nope", &ConsoleSettings::default());
        assert!(matches!(
            outcome,
            Err(DispatchError::NoSuchCommand { command: Some(c), .. }) if c == "nope"
        ));
    }

    #[test]
    fn test_overload_by_arity() {
        let settings = ConsoleSettings::default();

        let (outcome, calls, _) = run("x set 5 6", &settings);
        assert!(outcome.is_ok());
        assert_eq!(calls, vec!["set2(5,6)"]);

        let (outcome, calls, _) = run("x set 5", &settings);
        assert!(outcome.is_ok());
        assert_eq!(calls, vec!["set1(5)"]);
    }

    #[test]
    fn test_command_name_ignores_case() {
        let (outcome, calls, _) = run("X SET 1", &ConsoleSettings::default());
        assert_eq!(
            outcome,
            Ok(Invocation {
                prefix: "x".to_string(),
                command: Some("set".to_string())
            })
        );
        assert_eq!(calls, vec!["set1(1)"]);
    }

    #[test]
    fn test_bad_arguments() {
        let (outcome, calls, log) = run("x set a b", &ConsoleSettings::default());
        assert_eq!(
            outcome,
            Err(DispatchError::BadArguments {
                prefix: "x".to_string(),
                command: "set".to_string(),
                arguments: vec!["a".to_string(), "b".to_string()],
            })
        );
        assert!(calls.is_empty());
        assert_eq!(log.last().map(|e| e.level), Some(LogLevel::Error));
    }

    #[test]
    fn test_empty_tokens_count_as_arguments() {
        let (outcome, calls, _) = run("x set  5", &ConsoleSettings::default());
        assert!(matches!(outcome, Err(DispatchError::BadArguments { .. })));
        assert!(calls.is_empty());
    }

    #[test]
    fn test_bool_coercion_never_fails() {
        let settings = ConsoleSettings::default();
        for (token, expected) in [("TRUE", "true"), ("true", "true"), ("anything-else", "false")] {
            let (outcome, calls, _) = run(&format!("x flag {token}"), &settings);
            assert!(outcome.is_ok());
            assert_eq!(calls, vec![format!("flag({expected})")]);
        }
    }

    #[test]
    fn test_hidden_gated_by_execute_flag() {
        let mut settings = ConsoleSettings::default();
        settings.execute_hidden_commands = true;
        let (outcome, calls, _) = run("x secret", &settings);
        assert!(outcome.is_ok());
        assert_eq!(calls, vec!["secret()"]);

        settings.execute_hidden_commands = false;
        let (outcome, calls, _) = run("x secret", &settings);
        assert!(matches!(outcome, Err(DispatchError::NoSuchCommand { .. })));
        assert!(calls.is_empty());
    }

    #[test]
    fn test_invocation_failure_without_trace() {
        let (outcome, _, log) = run("x boom", &ConsoleSettings::default());
        assert_eq!(
            outcome,
            Err(DispatchError::InvocationFailed {
                message: "boom failed".to_string(),
                trace: None
            })
        );
        let entries: Vec<_> = log.entries().map(|e| (e.level, e.message.clone())).collect();
        assert_eq!(
            entries,
            vec![
                (LogLevel::Command, "x boom".to_string()),
                (LogLevel::Error, "boom failed".to_string()),
            ]
        );
    }

    #[test]
    fn test_invocation_failure_with_trace() {
        let mut settings = ConsoleSettings::default();
        settings.stack_trace = true;
        let (outcome, _, log) = run("x boom", &settings);

        match outcome {
            Err(DispatchError::InvocationFailed {
                trace: Some(trace), ..
            }) => {
                assert!(trace.contains("boom failed"));
                assert!(trace.contains("disk on fire"));
            }
            other => panic!("expected a traced invocation failure, got {other:?}"),
        }
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_every_dispatch_echoes_line() {
        let (_, _, log) = run("x set 1", &ConsoleSettings::default());
        let first = log.entries().next().cloned();
        assert_eq!(
            first.map(|e| (e.level, e.message)),
            Some((LogLevel::Command, "x set 1".to_string()))
        );
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_blank_line() {
        let (outcome, _, _) = run("   ", &ConsoleSettings::default());
        assert_eq!(outcome, Err(DispatchError::NoSuchContainer(String::new())));
    }
}
