//! Configuration management for cmdeck.
//!
//! Loads console settings from a TOML file. Every field is optional; a missing
//! file yields the defaults.

use crate::error::{ConsoleError, Result};
use crate::log::DEFAULT_MAX_ENTRIES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for cmdeck.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Console behavior toggles.
    #[serde(default)]
    pub console: ConsoleSettings,
}

/// Process-wide console toggles read by dispatch and help.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsoleSettings {
    /// Whether hidden commands can be executed.
    #[serde(default = "default_true")]
    pub execute_hidden_commands: bool,

    /// Whether hidden commands appear in help listings.
    #[serde(default)]
    pub display_hidden_commands: bool,

    /// Whether failed commands report their causal chain and backtrace.
    #[serde(default)]
    pub stack_trace: bool,

    /// Number of entries kept in the console log.
    #[serde(default = "default_max_log_entries")]
    pub max_log_entries: usize,

    /// Whether log entries are echoed to stdout/stderr as they are recorded.
    #[serde(default)]
    pub log_to_stdio: bool,
}

fn default_true() -> bool {
    true
}

fn default_max_log_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            execute_hidden_commands: default_true(),
            display_hidden_commands: false,
            stack_trace: false,
            max_log_entries: default_max_log_entries(),
            log_to_stdio: false,
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cmdeck")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConsoleError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            ConsoleError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that parse but make no sense.
    pub fn validate(&self) -> Result<()> {
        if self.console.max_log_entries == 0 {
            return Err(ConsoleError::config(
                "console.max_log_entries must be at least 1",
            ));
        }
        Ok(())
    }
}
