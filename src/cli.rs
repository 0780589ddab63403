//! Command-line argument parsing for cmdeck.

use cmdeck::config::Config;
use cmdeck::headless::{HeadlessConfig, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

/// An embeddable command console, driven from the terminal.
#[derive(Parser, Debug)]
#[command(name = "cmdeck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long, value_name = "PATH", env = "CMDECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Execute a console line and exit (repeatable)
    #[arg(short = 'e', long = "exec", value_name = "LINE")]
    pub exec: Vec<String>,

    // === Headless mode options ===
    /// Run in headless mode (scripted key presses, for testing/automation)
    #[arg(long)]
    pub headless: bool,

    /// Comma-separated events to execute in headless mode (e.g., "type:help,key:enter")
    #[arg(long, value_name = "EVENTS")]
    pub events: Option<String>,

    /// Path to script file with events (use "-" for stdin)
    #[arg(long, value_name = "PATH")]
    pub script: Option<String>,

    /// Output format for headless mode
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub output: String,

    /// Write output to file instead of stdout
    #[arg(long, value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Stop on first assertion failure
    #[arg(long)]
    pub fail_fast: bool,

    /// List hidden commands in help output
    #[arg(long)]
    pub show_hidden: bool,

    /// Report the full error chain when a command fails
    #[arg(long)]
    pub trace: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Parses the output format from the --output argument.
    pub fn parse_output_format(&self) -> std::result::Result<OutputFormat, String> {
        self.output.parse()
    }

    /// Validates headless mode arguments.
    /// Returns an error message if validation fails.
    pub fn validate_headless(&self) -> std::result::Result<(), String> {
        if !self.headless {
            return Ok(());
        }

        // Headless mode requires either --events or --script
        if self.events.is_none() && self.script.is_none() {
            return Err("--headless requires --events or --script".to_string());
        }

        self.parse_output_format()?;

        Ok(())
    }

    /// Builds the headless configuration. Call [`Cli::validate_headless`] first.
    pub fn headless_config(&self) -> std::result::Result<HeadlessConfig, String> {
        Ok(HeadlessConfig {
            output_format: self.parse_output_format()?,
            fail_fast: self.fail_fast,
            output_file: self.output_file.clone(),
        })
    }

    /// Applies flags that override the config file.
    pub fn apply_overrides(&self, config: &mut Config) {
        if self.show_hidden {
            config.console.display_hidden_commands = true;
        }
        if self.trace {
            config.console.stack_trace = true;
        }
    }
}
