//! Console log sinks.
//!
//! The dispatcher and the help commands report everything through a
//! [`LogSink`]. [`ConsoleLog`] keeps a bounded in-memory history for a display
//! layer to render; [`TracingSink`] forwards entries to `tracing`.

use serde::Serialize;
use std::collections::VecDeque;

/// Severity/kind of a console log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Regular output.
    Default,
    /// A failed command or other error.
    Error,
    /// A success message.
    Success,
    /// An echoed input line.
    Command,
}

/// Receives console output.
pub trait LogSink {
    /// Records one message.
    fn record(&mut self, message: &str, level: LogLevel);
}

impl<T: LogSink + ?Sized> LogSink for &mut T {
    fn record(&mut self, message: &str, level: LogLevel) {
        (**self).record(message, level);
    }
}

impl<T: LogSink + ?Sized> LogSink for Box<T> {
    fn record(&mut self, message: &str, level: LogLevel) {
        (**self).record(message, level);
    }
}

/// A single recorded entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub message: String,
    pub level: LogLevel,
}

/// Default number of entries kept by [`ConsoleLog`].
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// Bounded in-memory log.
///
/// When full, the oldest entry is evicted. Optionally echoes every entry to
/// stdout (stderr for errors) prefixed with `"> "`.
#[derive(Debug, Clone)]
pub struct ConsoleLog {
    entries: VecDeque<LogEntry>,
    max_entries: usize,
    echo_to_stdio: bool,
}

impl Default for ConsoleLog {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

impl ConsoleLog {
    /// Creates a log holding at most `max_entries` entries (minimum 1).
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: max_entries.max(1),
            echo_to_stdio: false,
        }
    }

    /// Enables or disables echoing to stdout/stderr.
    pub fn set_echo_to_stdio(&mut self, echo: bool) {
        self.echo_to_stdio = echo;
    }

    /// Changes the capacity, dropping the oldest entries if needed.
    pub fn set_max_entries(&mut self, max_entries: usize) {
        self.max_entries = max_entries.max(1);
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the most recent entry.
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Renders all entries as plain text, one per line.
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|entry| match entry.level {
                LogLevel::Command => format!("> {}", entry.message),
                _ => entry.message.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl LogSink for ConsoleLog {
    fn record(&mut self, message: &str, level: LogLevel) {
        if self.echo_to_stdio {
            match level {
                LogLevel::Error => eprintln!("> {message}"),
                _ => println!("> {message}"),
            }
        }

        if self.entries.len() == self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            message: message.to_string(),
            level,
        });
    }
}

/// Forwards console entries to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn record(&mut self, message: &str, level: LogLevel) {
        match level {
            LogLevel::Error => tracing::error!(target: "cmdeck::console", "{message}"),
            LogLevel::Command => tracing::info!(target: "cmdeck::console", command = message),
            LogLevel::Success | LogLevel::Default => {
                tracing::info!(target: "cmdeck::console", "{message}")
            }
        }
    }
}
