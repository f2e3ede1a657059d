//! Argument parsing for the `trial` test runner CLI.
//!
//! This crate turns a process argument vector into a subcommand name, an
//! ordered list of filters, and a map of raw option values. It knows nothing
//! about run modes or the runner engine; that is the job of
//! `trial-dispatch` and `trial`.
//!
//! # Pipeline
//!
//! ```text
//! argv → parser::parse ──ok──→ ParsedArgs
//!                     └─err─→ conflict::diagnose → ArgsError::{Parse, Conflict}
//! ```
//!
//! Registered options are parsed with the clap [`command()`] built from the
//! option table; the same command renders `--help`.
//!
//! # Example
//!
//! ```rust
//! use trial_args::{parse_args, ArgsError, CliConfig, OptionValue};
//!
//! let config = CliConfig::default();
//! let argv: Vec<String> = ["run", "basic", "--coverage.enabled"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! let parsed = parse_args(&config, &argv).unwrap();
//! assert_eq!(parsed.command.as_deref(), Some("run"));
//! assert_eq!(parsed.filters, vec!["basic"]);
//! assert!(parsed.options["coverage"].is_map());
//!
//! let argv: Vec<String> = ["--coverage", "--coverage.reporter", "text"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! assert!(matches!(parse_args(&config, &argv), Err(ArgsError::Conflict(_))));
//! ```

mod command;
mod config;
mod conflict;
mod error;
mod parser;
mod schema;
mod value;

pub use command::{command, POSITIONALS};
pub use config::CliConfig;
pub use conflict::{diagnose, find_conflicts};
pub use error::{ArgsError, Conflict, ConflictError, ParseFailure, Result};
pub use parser::{parse, ParsedArgs};
pub use schema::{camel_case, OptionSpec, ValueKind, COMMANDS, OPTIONS};
pub use value::{Number, OptionValue, RawOptions};

/// Parses arguments, explaining boolean/dot-notation conflicts on failure.
///
/// `args` must not include the program name.
pub fn parse_args(config: &CliConfig, args: &[String]) -> Result<ParsedArgs> {
    parse(config, args).map_err(diagnose)
}
