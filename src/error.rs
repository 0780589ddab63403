//! Error types for cmdeck.
//!
//! `ConsoleError` covers everything outside of command dispatch (configuration,
//! headless scripts, I/O). Dispatch failures are reported through
//! [`DispatchError`](crate::commands::DispatchError) instead.

use thiserror::Error;

/// Main error type for cmdeck operations.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Configuration errors (invalid config file, bad values, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Headless script errors (unknown event, malformed assertion, etc.)
    #[error("Script error: {0}")]
    Script(String),

    /// I/O errors (reading scripts or stdin, writing output files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConsoleError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a script error with the given message.
    pub fn script(msg: impl Into<String>) -> Self {
        Self::Script(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration Error",
            Self::Script(_) => "Script Error",
            Self::Io(_) => "I/O Error",
        }
    }
}

/// Result type alias using ConsoleError.
pub type Result<T> = std::result::Result<T, ConsoleError>;
