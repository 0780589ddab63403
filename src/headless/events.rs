//! Event DSL parser for headless mode.
//!
//! Parses event strings like "type:help", "key:tab", "assert:contains:math"
//! into executable events.

use crate::error::{ConsoleError, Result};
use std::fmt;

/// An assertion to check against the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assertion {
    /// Log text contains the text (case-insensitive).
    Contains(String),
    /// Log text does not contain the text (case-insensitive).
    NotContains(String),
    /// Input line equals the text exactly.
    Input(String),
}

impl Assertion {
    /// Checks the assertion against the rendered log and the input line.
    pub fn check(&self, screen: &str, input: &str) -> bool {
        match self {
            Self::Contains(text) => screen.to_lowercase().contains(&text.to_lowercase()),
            Self::NotContains(text) => !screen.to_lowercase().contains(&text.to_lowercase()),
            Self::Input(text) => input == text,
        }
    }
}

/// Keys understood by the headless console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Request the next completion.
    Tab,
    /// Execute the input line.
    Enter,
    /// Clear the input line.
    Esc,
    Backspace,
    Space,
}

impl Key {
    fn name(&self) -> &'static str {
        match self {
            Self::Tab => "tab",
            Self::Enter => "enter",
            Self::Esc => "esc",
            Self::Backspace => "backspace",
            Self::Space => "space",
        }
    }
}

/// A parsed event that can be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press event.
    Key(Key),
    /// Append text to the input line.
    Type(String),
    /// Assert something about the console.
    Assert(Assertion),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "key:{}", key.name()),
            Self::Type(text) => write!(f, "type:{text}"),
            Self::Assert(a) => match a {
                Assertion::Contains(t) => write!(f, "assert:contains:{t}"),
                Assertion::NotContains(t) => write!(f, "assert:not-contains:{t}"),
                Assertion::Input(t) => write!(f, "assert:input:{t}"),
            },
        }
    }
}

/// Parser for the event DSL.
#[derive(Debug, Default)]
pub struct EventParser;

impl EventParser {
    /// Creates a new event parser.
    pub fn new() -> Self {
        Self
    }

    /// Parses all events from an input string.
    /// Supports comma-separated and newline-separated events.
    ///
    /// Trailing spaces of `type:` events are kept, so `type:help ` types a
    /// space after the word.
    pub fn parse_all(&self, input: &str) -> Result<Vec<Event>> {
        let mut events = Vec::new();

        for line in input.lines() {
            // Skip empty lines and comments
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            for part in line.split(',') {
                if part.trim().is_empty() {
                    continue;
                }
                events.push(self.parse_one(part)?);
            }
        }

        Ok(events)
    }

    /// Parses a single event string.
    pub fn parse_one(&self, input: &str) -> Result<Event> {
        let input = input.trim_start();

        let (event_type, value) = match input.split_once(':') {
            Some((t, v)) => (t.trim().to_lowercase(), v),
            None => {
                return Err(ConsoleError::script(format!(
                    "Invalid event syntax: '{}'. Expected format: type:value",
                    input.trim()
                )));
            }
        };

        match event_type.as_str() {
            "key" => self.parse_key(value.trim()),
            "type" => Ok(Event::Type(value.to_string())),
            "assert" => self.parse_assert(value.trim_start()),
            _ => Err(ConsoleError::script(format!(
                "Unknown event type: '{event_type}'. Valid types: key, type, assert"
            ))),
        }
    }

    fn parse_key(&self, value: &str) -> Result<Event> {
        let key = match value.to_lowercase().as_str() {
            "tab" => Key::Tab,
            "enter" | "return" => Key::Enter,
            "esc" | "escape" => Key::Esc,
            "backspace" | "bs" => Key::Backspace,
            "space" => Key::Space,
            _ => {
                return Err(ConsoleError::script(format!(
                    "Unknown key: '{value}'. Valid keys: tab, enter, esc, backspace, space"
                )));
            }
        };
        Ok(Event::Key(key))
    }

    /// Parses an assertion like "contains:hello" or "input:help print".
    fn parse_assert(&self, value: &str) -> Result<Event> {
        let (assert_type, rest) = match value.split_once(':') {
            Some((t, r)) => (t.trim().to_lowercase(), r),
            None => {
                return Err(ConsoleError::script(format!(
                    "Invalid assertion syntax: '{value}'. Expected assert:type:value"
                )));
            }
        };

        let assertion = match assert_type.as_str() {
            "contains" => Assertion::Contains(rest.trim().to_string()),
            "not-contains" => Assertion::NotContains(rest.trim().to_string()),
            // The input line can legitimately end in a space
            "input" => Assertion::Input(rest.trim_start().to_string()),
            _ => {
                return Err(ConsoleError::script(format!(
                    "Unknown assertion type: '{assert_type}'. Valid types: contains, not-contains, input"
                )));
            }
        };

        Ok(Event::Assert(assertion))
    }
}
