//! Command containers: named groups of commands sharing a prefix.
//!
//! A container owns an ordered list of [`CommandDescriptor`]s and invokes the
//! operation bound to each one by index. [`CommandGroup`] is the ready-made
//! implementation that binds closures at registration time; implement
//! [`CommandContainer`] directly to dispatch with a `match` on the index.

use std::fmt;

use super::descriptor::{CommandDescriptor, Value};
use super::registry::Registry;
use crate::config::ConsoleSettings;
use crate::log::{LogLevel, LogSink};

/// Context provided to command operations.
pub struct CommandContext<'a> {
    registry: &'a Registry,
    settings: &'a ConsoleSettings,
    sink: &'a mut dyn LogSink,
}

impl<'a> CommandContext<'a> {
    /// Creates a context over the given registry, settings and sink.
    pub fn new(
        registry: &'a Registry,
        settings: &'a ConsoleSettings,
        sink: &'a mut dyn LogSink,
    ) -> Self {
        Self {
            registry,
            settings,
            sink,
        }
    }

    /// The registry the command was dispatched from.
    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Current console settings.
    pub fn settings(&self) -> &'a ConsoleSettings {
        self.settings
    }

    /// Records a message at the given level.
    pub fn log(&mut self, message: impl AsRef<str>, level: LogLevel) {
        self.sink.record(message.as_ref(), level);
    }

    /// Records a regular output message.
    pub fn print(&mut self, message: impl AsRef<str>) {
        self.log(message, LogLevel::Default);
    }

    /// Records a success message.
    pub fn success(&mut self, message: impl AsRef<str>) {
        self.log(message, LogLevel::Success);
    }

    /// Records an error message.
    pub fn error(&mut self, message: impl AsRef<str>) {
        self.log(message, LogLevel::Error);
    }
}

/// A named group of commands.
///
/// Methods take `&self`: the dispatcher holds the registry immutably while an
/// operation runs, so containers that keep state use `Cell`/`RefCell`.
pub trait CommandContainer {
    /// The prefix typed before a command name.
    fn prefix(&self) -> &str;

    /// Descriptors in registration order.
    fn commands(&self) -> &[CommandDescriptor];

    /// Invokes the operation bound to `commands()[index]`.
    ///
    /// `args` have already been coerced to the descriptor's parameter types.
    fn invoke(
        &self,
        index: usize,
        ctx: &mut CommandContext<'_>,
        args: &[Value],
    ) -> anyhow::Result<()>;

    /// Whether the container runs an operation when only its prefix is given.
    fn has_default(&self) -> bool {
        false
    }

    /// Runs the default operation.
    fn invoke_default(&self, _ctx: &mut CommandContext<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Values for the autocomplete option group `group`.
    ///
    /// `None` means the container offers no parameter completions at all.
    fn autocomplete_options(&self, _group: u32, _registry: &Registry) -> Option<Vec<String>> {
        None
    }
}

type Handler = Box<dyn Fn(&mut CommandContext<'_>, &[Value]) -> anyhow::Result<()>>;
type DefaultHandler = Box<dyn Fn(&mut CommandContext<'_>) -> anyhow::Result<()>>;
type OptionSource = Box<dyn Fn(u32) -> Vec<String>>;

/// A container whose commands are closures bound at registration time.
pub struct CommandGroup {
    prefix: String,
    descriptors: Vec<CommandDescriptor>,
    handlers: Vec<Handler>,
    default: Option<DefaultHandler>,
    options: Option<OptionSource>,
}

impl CommandGroup {
    /// Creates an empty group.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            descriptors: Vec::new(),
            handlers: Vec::new(),
            default: None,
            options: None,
        }
    }

    /// Adds a command bound to `handler`.
    pub fn command<F>(mut self, descriptor: CommandDescriptor, handler: F) -> Self
    where
        F: Fn(&mut CommandContext<'_>, &[Value]) -> anyhow::Result<()> + 'static,
    {
        self.descriptors.push(descriptor);
        self.handlers.push(Box::new(handler));
        self
    }

    /// Sets the operation run when only the prefix is given.
    pub fn default_command<F>(self, handler: F) -> Self
    where
        F: Fn(&mut CommandContext<'_>) -> anyhow::Result<()> + 'static,
    {
        Self {
            default: Some(Box::new(handler)),
            ..self
        }
    }

    /// Sets the source of autocomplete option values, keyed by group id.
    pub fn options<F>(self, source: F) -> Self
    where
        F: Fn(u32) -> Vec<String> + 'static,
    {
        Self {
            options: Some(Box::new(source)),
            ..self
        }
    }
}

impl fmt::Debug for CommandGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandGroup")
            .field("prefix", &self.prefix)
            .field("descriptors", &self.descriptors)
            .field("has_default", &self.default.is_some())
            .field("has_options", &self.options.is_some())
            .finish()
    }
}

impl CommandContainer for CommandGroup {
    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn commands(&self) -> &[CommandDescriptor] {
        &self.descriptors
    }

    fn invoke(
        &self,
        index: usize,
        ctx: &mut CommandContext<'_>,
        args: &[Value],
    ) -> anyhow::Result<()> {
        let handler = self.handlers.get(index).ok_or_else(|| {
            anyhow::anyhow!("no operation bound at index {index} in '{}'", self.prefix)
        })?;
        handler(ctx, args)
    }

    fn has_default(&self) -> bool {
        self.default.is_some()
    }

    fn invoke_default(&self, ctx: &mut CommandContext<'_>) -> anyhow::Result<()> {
        match &self.default {
            Some(handler) => handler(ctx),
            None => Ok(()),
        }
    }

    fn autocomplete_options(&self, group: u32, _registry: &Registry) -> Option<Vec<String>> {
        self.options.as_ref().map(|source| source(group))
    }
}
