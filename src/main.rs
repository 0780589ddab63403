//! cmdeck - an embeddable command console, driven from the terminal.

mod cli;

use cli::Cli;
use cmdeck::config::Config;
use cmdeck::console::Console;
use cmdeck::demo;
use cmdeck::error::{ConsoleError, Result};
use cmdeck::headless::{self, HeadlessRunner};
use cmdeck::log::ConsoleLog;
use cmdeck::logging;
use std::io::{self, BufRead, Write};
use tracing::{error, info};

fn main() {
    logging::init_stderr_logging(logging::DEFAULT_FILTER);

    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{}: {}", e.category(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse_args();

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;
    cli.apply_overrides(&mut config);

    let mut console = Console::from_config(&config);
    demo::register(&mut console);

    if cli.headless {
        return run_headless(&cli, console);
    }

    if !cli.exec.is_empty() {
        return run_lines(&mut console, cli.exec.iter().map(String::as_str));
    }

    run_interactive(&mut console)
}

/// Runs scripted events and reports the result. Exit code 1 on failed assertions.
fn run_headless(cli: &Cli, console: Console<ConsoleLog>) -> Result<i32> {
    cli.validate_headless().map_err(ConsoleError::config)?;
    let config = cli.headless_config().map_err(ConsoleError::config)?;

    let mut runner = HeadlessRunner::new(config.clone(), console);
    if let Some(events) = &cli.events {
        runner.load_events(events)?;
    } else if let Some(script) = &cli.script {
        runner.load_script(script)?;
    }

    let result = runner.run();
    headless::write_output(&config, &result)?;
    Ok(result.exit_code())
}

/// Executes each line in order. Exit code 1 if any line failed.
fn run_lines<'a>(
    console: &mut Console<ConsoleLog>,
    lines: impl IntoIterator<Item = &'a str>,
) -> Result<i32> {
    let mut failed = false;
    for line in lines {
        failed |= console.execute(line).is_err();
        flush_log(console)?;
    }
    Ok(i32::from(failed))
}

/// Reads lines from stdin until EOF.
///
/// A line ending in a tab prints the next completion of the text before it
/// instead of executing.
fn run_interactive(console: &mut Console<ConsoleLog>) -> Result<i32> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match line.strip_suffix('\t') {
            Some(partial) => {
                let completion = console.complete(partial);
                writeln!(io::stdout(), "{completion}")?;
            }
            None => {
                let _ = console.execute(&line);
                flush_log(console)?;
            }
        }
    }
    Ok(0)
}

/// Prints and clears the log, unless entries were already echoed as recorded.
fn flush_log(console: &mut Console<ConsoleLog>) -> Result<()> {
    if !console.settings().log_to_stdio {
        let text = console.sink().to_text();
        if !text.is_empty() {
            writeln!(io::stdout(), "{text}")?;
        }
    }
    console.sink_mut().clear();
    Ok(())
}
