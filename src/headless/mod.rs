//! Headless mode for scripted testing and automation.
//!
//! Drives a [`Console`] with scripted key presses and typed text, the way an
//! interactive front end would, and checks assertions against its log.

mod events;
mod output;

pub use events::{Assertion, Event, EventParser, Key};
pub use output::{HeadlessOutput, OutputFormat};

use crate::console::Console;
use crate::error::Result;
use crate::log::{ConsoleLog, LogEntry};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::debug;

/// Configuration for headless mode execution.
#[derive(Debug, Clone, Default)]
pub struct HeadlessConfig {
    /// Output format.
    pub output_format: OutputFormat,
    /// Whether to stop on first assertion failure.
    pub fail_fast: bool,
    /// Path to write output (None = stdout).
    pub output_file: Option<PathBuf>,
}

/// Result of headless execution.
#[derive(Debug)]
pub struct HeadlessResult {
    /// Final console log as text.
    pub screen: String,
    /// Log lines for JSON output.
    pub screen_lines: Vec<String>,
    /// Number of events executed.
    pub events_executed: usize,
    /// Total execution duration.
    pub duration: Duration,
    /// Number of assertions passed.
    pub assertions_passed: usize,
    /// Number of assertions failed.
    pub assertions_failed: usize,
    /// The failed assertions, as written in the script.
    pub failures: Vec<String>,
    /// Console state snapshot.
    pub state: HeadlessState,
}

impl HeadlessResult {
    /// Process exit code: 1 if any assertion failed.
    pub fn exit_code(&self) -> i32 {
        if self.assertions_failed > 0 {
            1
        } else {
            0
        }
    }
}

/// Snapshot of console state for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct HeadlessState {
    /// Current input text.
    pub input_text: String,
    /// Every entry still held by the log.
    pub log: Vec<LogEntry>,
    /// Registered prefixes.
    pub prefixes: Vec<String>,
    /// Candidates of the active completion session.
    pub completion_candidates: Vec<String>,
}

impl HeadlessState {
    fn capture(console: &Console<ConsoleLog>, input: &str) -> Self {
        Self {
            input_text: input.to_string(),
            log: console.sink().entries().cloned().collect(),
            prefixes: console.prefixes(),
            completion_candidates: console
                .completer()
                .session()
                .map(|s| s.candidates().to_vec())
                .unwrap_or_default(),
        }
    }
}

/// Runs a console from scripted events.
pub struct HeadlessRunner {
    config: HeadlessConfig,
    console: Console<ConsoleLog>,
    input: String,
    events: Vec<Event>,
    assertions_passed: usize,
    assertions_failed: usize,
    failures: Vec<String>,
}

impl HeadlessRunner {
    /// Creates a new headless runner over `console`.
    pub fn new(config: HeadlessConfig, console: Console<ConsoleLog>) -> Self {
        Self {
            config,
            console,
            input: String::new(),
            events: Vec::new(),
            assertions_passed: 0,
            assertions_failed: 0,
            failures: Vec::new(),
        }
    }

    /// Loads events from a string (comma-separated or newline-separated).
    pub fn load_events(&mut self, input: &str) -> Result<()> {
        let parser = EventParser::new();
        self.events = parser.parse_all(input)?;
        Ok(())
    }

    /// Loads events from a script file, or stdin when `path` is `-`.
    pub fn load_script(&mut self, path: &str) -> Result<()> {
        let content = if path == "-" {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        } else {
            std::fs::read_to_string(path)?
        };

        self.load_events(&content)
    }

    /// Runs every loaded event and returns the result.
    pub fn run(mut self) -> HeadlessResult {
        let start_time = Instant::now();
        let events = std::mem::take(&mut self.events);
        let mut events_executed = 0;

        for event in events {
            debug!(event = %event, "Headless event");
            match &event {
                Event::Key(key) => self.handle_key(*key),
                Event::Type(text) => self.input.push_str(text),
                Event::Assert(assertion) => {
                    let screen = self.console.sink().to_text();
                    if assertion.check(&screen, &self.input) {
                        self.assertions_passed += 1;
                    } else {
                        self.assertions_failed += 1;
                        self.failures.push(event.to_string());
                        if self.config.fail_fast {
                            events_executed += 1;
                            break;
                        }
                    }
                }
            }
            events_executed += 1;
        }

        let screen = self.console.sink().to_text();
        let screen_lines = screen.lines().map(String::from).collect();

        HeadlessResult {
            screen,
            screen_lines,
            events_executed,
            duration: start_time.elapsed(),
            assertions_passed: self.assertions_passed,
            assertions_failed: self.assertions_failed,
            failures: self.failures,
            state: HeadlessState::capture(&self.console, &self.input),
        }
    }

    fn handle_key(&mut self, key: Key) {
        match key {
            Key::Tab => self.input = self.console.complete(&self.input),
            Key::Enter => {
                let line = std::mem::take(&mut self.input);
                // Failures are already in the log
                let _ = self.console.execute(&line);
            }
            Key::Esc => {
                self.input.clear();
                self.console.reset_completion();
            }
            Key::Backspace => {
                self.input.pop();
            }
            Key::Space => self.input.push(' '),
        }
    }
}

/// Formats `result` and writes it to the configured file or stdout.
pub fn write_output(config: &HeadlessConfig, result: &HeadlessResult) -> Result<()> {
    let output_str = HeadlessOutput::new(config.output_format).format(result);

    match &config.output_file {
        Some(path) => std::fs::write(path, &output_str)?,
        None => print!("{output_str}"),
    }
    Ok(())
}
