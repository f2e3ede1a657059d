//! Command dispatch logic.
//!
//! Maps the parsed subcommand (or its absence) to a [`RunMode`] and applies
//! the option tweaks each command implies:
//!
//! | Command | Mode | Options |
//! |---------|------|---------|
//! | *(none)* | `test` | positional tokens are filters |
//! | `run` | `test` | `run = true` |
//! | `related` | `test` | positional tokens become `related`, `passWithNoTests` defaults to `true` |
//! | `watch`, `dev` | `test` | `watch = true` |
//! | `bench` | `benchmark` | experimental warning |
//! | `typecheck` | `typecheck` | experimental warning |

use std::fmt;
use std::io::Write;

use console::style;
use log::debug;
use serde::Serialize;
use trial_args::ParsedArgs;

use crate::error::{DispatchError, Result};
use crate::options::CliOptions;

/// What the runner engine should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Run (or watch) tests.
    Test,
    /// Run benchmarks.
    Benchmark,
    /// Run type checks.
    Typecheck,
}

impl RunMode {
    /// The name the runner knows this mode by.
    pub fn as_str(self) -> &'static str {
        match self {
            RunMode::Test => "test",
            RunMode::Benchmark => "benchmark",
            RunMode::Typecheck => "typecheck",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const BENCH_WARNING: &str = "Benchmarking is an experimental feature.\n\
    Breaking changes might not follow semver, please pin trial's version when using it.";

const TYPECHECK_WARNING: &str = "Testing types with tsc and vue-tsc is an experimental feature.\n\
    Breaking changes might not follow semver, please pin trial's version when using it.";

/// A subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Run,
    Related,
    Watch,
    Dev,
    Bench,
    Typecheck,
}

impl Command {
    /// Every routed subcommand.
    pub const ALL: [Command; 6] = [
        Command::Run,
        Command::Related,
        Command::Watch,
        Command::Dev,
        Command::Bench,
        Command::Typecheck,
    ];

    /// The name typed on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Command::Run => "run",
            Command::Related => "related",
            Command::Watch => "watch",
            Command::Dev => "dev",
            Command::Bench => "bench",
            Command::Typecheck => "typecheck",
        }
    }

    /// Looks a subcommand up by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == name)
    }

    /// The run mode this subcommand selects.
    pub fn mode(self) -> RunMode {
        match self {
            Command::Bench => RunMode::Benchmark,
            Command::Typecheck => RunMode::Typecheck,
            Command::Run | Command::Related | Command::Watch | Command::Dev => RunMode::Test,
        }
    }

    /// Stability warning printed before experimental modes run.
    pub fn warning(self) -> Option<&'static str> {
        match self {
            Command::Bench => Some(BENCH_WARNING),
            Command::Typecheck => Some(TYPECHECK_WARNING),
            _ => None,
        }
    }
}

/// A fully dispatched request for the runner engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub mode: RunMode,
    pub filters: Vec<String>,
    pub options: CliOptions,
}

/// Applies a subcommand to the parsed positionals and options.
///
/// Warnings for experimental modes go to `warnings`.
pub fn dispatch(
    command: Option<Command>,
    positionals: Vec<String>,
    mut options: CliOptions,
    warnings: &mut dyn Write,
) -> std::io::Result<Invocation> {
    let mut filters = positionals;

    match command {
        None | Some(Command::Bench) | Some(Command::Typecheck) => {}
        Some(Command::Run) => options.run = Some(true),
        Some(Command::Watch) | Some(Command::Dev) => options.watch = Some(true),
        Some(Command::Related) => {
            options.related = Some(std::mem::take(&mut filters));
            options.pass_with_no_tests.get_or_insert(true);
        }
    }

    if let Some(message) = command.and_then(Command::warning) {
        writeln!(warnings, "{}", style(message).yellow().for_stderr())?;
    }

    let mode = command.map_or(RunMode::Test, Command::mode);
    debug!(
        "dispatched command={} mode={mode} filters={}",
        command.map_or("<default>", Command::name),
        filters.len()
    );

    Ok(Invocation {
        mode,
        filters,
        options,
    })
}

/// Types the parsed options and dispatches on the parsed subcommand.
pub fn resolve(parsed: ParsedArgs, warnings: &mut dyn Write) -> Result<Invocation> {
    let command = parsed
        .command
        .as_deref()
        .map(|name| {
            Command::from_name(name).ok_or_else(|| DispatchError::UnknownCommand(name.to_string()))
        })
        .transpose()?;
    let options = CliOptions::from_raw(parsed.options)?;
    Ok(dispatch(command, parsed.filters, options, warnings)?)
}
