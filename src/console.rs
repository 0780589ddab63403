//! The embeddable console: registry, completer, settings and output sink in
//! one place.

use tracing::{debug, info};

use crate::commands::{
    dispatch, CommandContainer, Completer, DispatchError, DispatchOutcome, Registry, HELP_PREFIX,
};
use crate::config::{Config, ConsoleSettings};
use crate::log::{ConsoleLog, LogLevel, LogSink};

/// A command console.
///
/// Owns the container registry and routes every line through the dispatcher,
/// recording output into `S`. Any change to the registry discards the current
/// completion session.
#[derive(Debug)]
pub struct Console<S: LogSink = ConsoleLog> {
    registry: Registry,
    completer: Completer,
    settings: ConsoleSettings,
    sink: S,
    disabled: bool,
}

impl Console<ConsoleLog> {
    /// Creates a console whose log follows `config`.
    pub fn from_config(config: &Config) -> Self {
        let settings = config.console.clone();
        let mut log = ConsoleLog::new(settings.max_log_entries);
        log.set_echo_to_stdio(settings.log_to_stdio);
        Self::with_settings(settings, log)
    }
}

impl<S: LogSink> Console<S> {
    /// Creates a console with default settings.
    pub fn new(sink: S) -> Self {
        Self::with_settings(ConsoleSettings::default(), sink)
    }

    pub fn with_settings(settings: ConsoleSettings, sink: S) -> Self {
        Self {
            registry: Registry::new(),
            completer: Completer::new(),
            settings,
            sink,
            disabled: false,
        }
    }

    /// Registers a container, replacing any container with the same prefix.
    pub fn add_container<C>(&mut self, container: C)
    where
        C: CommandContainer + 'static,
    {
        if let Some(old) = self.registry.add(container) {
            info!(prefix = old.prefix(), "Replaced command container");
        }
        self.completer.reset();
    }

    /// Removes the container registered under `prefix`.
    ///
    /// Returns true if a container was removed.
    pub fn remove_container(&mut self, prefix: &str) -> bool {
        let removed = self.registry.remove(prefix).is_some();
        self.completer.reset();
        removed
    }

    /// Returns true if any container besides `help` is registered.
    pub fn has_containers(&self) -> bool {
        self.registry
            .prefixes()
            .iter()
            .any(|prefix| prefix != HELP_PREFIX)
    }

    /// Registered prefixes in registration order.
    pub fn prefixes(&self) -> Vec<String> {
        self.registry.prefixes()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Executes one input line.
    ///
    /// A disabled console records nothing and returns
    /// [`DispatchError::Disabled`].
    pub fn execute(&mut self, line: &str) -> DispatchOutcome {
        if self.disabled {
            debug!(line, "Console disabled, ignoring input");
            return Err(DispatchError::Disabled);
        }
        self.completer.reset();
        dispatch(&self.registry, &self.settings, &mut self.sink, line)
    }

    /// Returns the next completion for `line`.
    pub fn complete(&mut self, line: &str) -> String {
        self.completer.complete(&self.registry, line)
    }

    /// Discards the current completion session.
    pub fn reset_completion(&mut self) {
        self.completer.reset();
    }

    pub fn completer(&self) -> &Completer {
        &self.completer
    }

    /// Records a message directly.
    pub fn log(&mut self, message: &str, level: LogLevel) {
        self.sink.record(message, level);
    }

    /// Records an error, with its causal chain when stack traces are enabled.
    pub fn log_error(&mut self, err: &anyhow::Error) {
        let mut message = err.to_string();
        if message.is_empty() {
            message = "Unknown error".to_string();
        }
        self.sink.record(&message, LogLevel::Error);
        if self.settings.stack_trace {
            self.sink.record(&format!("{err:?}"), LogLevel::Error);
        }
    }

    pub fn settings(&self) -> &ConsoleSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ConsoleSettings {
        &mut self.settings
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}
