//! Argument classification.
//!
//! Sorts every token into one of:
//!
//! - a registered option (`--root src`, `-w`, `--no-color`, `--api=3000`)
//! - a dot-notation option (`--coverage.exclude dist`), stored as a nested map
//! - a positional token (subcommand name or filter)
//!
//! ```text
//! trial run --coverage.enabled --coverage.reporter text basic
//!       ^^^ ^^^^^^^^^^^^^^^^^^ ^^^^^^^^^^^^^^^^^^^^^^^^^ ^^^^^
//!  command   coverage.enabled   coverage.reporter = text  filter
//! ```
//!
//! Registered options are parsed by clap. Dot-notation keys, explicit
//! boolean values (`--isolate=false`) and `--no-` spellings clap does not
//! know about are lifted out first and merged into the result afterwards.
//!
//! A bare boolean and its own dotted sub-keys cannot live in the same map
//! (`coverage` cannot be both `true` and `{reporter: "text"}`), so that
//! combination fails with a [`ParseFailure`]. The conflict diagnoser turns
//! that failure into a readable message.

use std::iter::Peekable;
use std::slice::Iter;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::parser::ValueSource;
use clap::ArgMatches;
use log::debug;

use crate::command::{command, POSITIONALS};
use crate::config::CliConfig;
use crate::error::ParseFailure;
use crate::schema::{OptionSpec, ValueKind};
use crate::value::{Number, OptionValue, RawOptions};

/// The result of a successful parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArgs {
    /// Subcommand name, when the first positional token is one.
    pub command: Option<String>,
    /// Remaining positional tokens, in order.
    pub filters: Vec<String>,
    /// Options keyed by camelCase name.
    pub options: RawOptions,
}

impl ParsedArgs {
    /// Removes a boolean option, returning whether it was set to `true`.
    pub fn take_flag(&mut self, key: &str) -> bool {
        matches!(self.options.remove(key), Some(OptionValue::Bool(true)))
    }
}

/// An option taken out of the argument vector before clap sees it.
#[derive(Debug)]
enum Lifted {
    /// `--coverage.reporter text`
    Dotted {
        typed: String,
        path: Vec<String>,
        value: OptionValue,
    },
    /// `--isolate=false`, `--no-api`
    Explicit {
        spec: &'static OptionSpec,
        value: OptionValue,
    },
}

/// Parses an argument vector (without the program name).
pub fn parse(config: &CliConfig, tokens: &[String]) -> Result<ParsedArgs, ParseFailure> {
    let fail = |message: String| ParseFailure::new(message, tokens);

    // everything after `--` is a filter, never a command
    let (head, tail) = match tokens.iter().position(|t| t == "--") {
        Some(end) => (&tokens[..end], &tokens[end + 1..]),
        None => (tokens, &[][..]),
    };

    let (passthrough, lifted) = lift(config, head).map_err(&fail)?;
    let matches = command(config)
        .try_get_matches_from(passthrough)
        .map_err(|err| fail(clap_message(&err)))?;

    let mut options = collect(config, &matches);
    for entry in lifted {
        apply(&mut options, entry).map_err(&fail)?;
    }
    for (key, value) in config.defaults() {
        options.entry(key).or_insert(value);
    }

    let mut filters: Vec<String> = matches
        .get_many::<String>(POSITIONALS)
        .into_iter()
        .flatten()
        .cloned()
        .collect();
    let subcommand = match filters.first() {
        Some(first) if config.is_command(first) => Some(filters.remove(0)),
        _ => None,
    };
    filters.extend(tail.iter().cloned());

    debug!(
        "parsed command={:?} filters={:?} options={:?}",
        subcommand,
        filters,
        options.keys().collect::<Vec<_>>()
    );

    Ok(ParsedArgs {
        command: subcommand,
        filters,
        options,
    })
}

/// Splits `head` into tokens for clap and options clap cannot express.
fn lift(config: &CliConfig, head: &[String]) -> Result<(Vec<String>, Vec<Lifted>), String> {
    let mut passthrough = Vec::with_capacity(head.len());
    let mut lifted = Vec::new();
    let mut rest = head.iter().peekable();

    while let Some(token) = rest.next() {
        let Some(body) = token.strip_prefix("--") else {
            passthrough.push(token.clone());
            continue;
        };
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        if name.contains('.') {
            lifted.push(dotted(config, name, inline, &mut rest)?);
            continue;
        }

        match config.find_long(name) {
            Some(spec) if spec.is_flag() => match inline {
                Some(value) => lifted.push(Lifted::Explicit {
                    spec,
                    value: if spec.is_negated() {
                        OptionValue::Bool(false)
                    } else {
                        OptionValue::from_token(value)
                    },
                }),
                None => passthrough.push(token.clone()),
            },
            Some(_) => passthrough.push(token.clone()),
            None => match negatable(config, name) {
                Some(spec) => lifted.push(Lifted::Explicit {
                    spec,
                    value: OptionValue::Bool(false),
                }),
                // unknown, clap reports it
                None => passthrough.push(token.clone()),
            },
        }
    }
    Ok((passthrough, lifted))
}

fn dotted(
    config: &CliConfig,
    name: &str,
    inline: Option<&str>,
    rest: &mut Peekable<Iter<'_, String>>,
) -> Result<Lifted, String> {
    let (root, keys) = name.split_once('.').unwrap_or((name, ""));
    let (spec, negated) = match config.find_long(root) {
        Some(spec) => (spec, false),
        None => match root.strip_prefix("no-").and_then(|r| config.find_long(r)) {
            Some(spec) => (spec, true),
            None => return Err(format!("Unknown option `--{name}`")),
        },
    };

    let mut path = vec![spec.key()];
    for segment in keys.split('.') {
        if segment.is_empty() {
            return Err(format!("Invalid option `--{name}`"));
        }
        path.push(segment.to_string());
    }

    let value = if negated {
        OptionValue::Bool(false)
    } else if let Some(token) = inline {
        coerce(spec, token)
    } else if let Some(token) = rest.next_if(|t| is_value_token(t)) {
        coerce(spec, token)
    } else {
        OptionValue::Bool(true)
    };

    Ok(Lifted::Dotted {
        typed: format!("--{name}"),
        path,
        value,
    })
}

/// Resolves `no-<name>` for options that are not registered negated.
fn negatable(config: &CliConfig, name: &str) -> Option<&'static OptionSpec> {
    let spec = config.find_long(name.strip_prefix("no-")?)?;
    let takes_bool = !matches!(spec.value, ValueKind::Required(_));
    (takes_bool && !spec.is_negated()).then_some(spec)
}

/// Reads registered options from clap, ignoring clap's defaults.
fn collect(config: &CliConfig, matches: &ArgMatches) -> RawOptions {
    let mut options = RawOptions::new();
    for spec in config.options {
        if matches.value_source(spec.long) != Some(ValueSource::CommandLine) {
            continue;
        }
        if spec.is_flag() {
            options.insert(spec.key(), OptionValue::Bool(!spec.is_negated()));
            continue;
        }

        let mut values = matches
            .get_many::<String>(spec.long)
            .into_iter()
            .flatten()
            .map(|token| coerce(spec, token));
        if let Some(mut value) = values.next() {
            values.for_each(|more| value.append(more));
            options.insert(spec.key(), value);
        }
    }
    options
}

fn apply(options: &mut RawOptions, entry: Lifted) -> Result<(), String> {
    match entry {
        Lifted::Dotted { typed, path, value } => insert_path(options, &path, value)
            .map_err(|reason| format!("Cannot set `{typed}`: {reason}")),
        Lifted::Explicit { spec, value } => {
            let key = spec.key();
            if matches!(options.get(&key), Some(OptionValue::Map(_))) {
                return Err(format!(
                    "Cannot set `--{}`: `{key}` already holds dot notation options",
                    spec.long
                ));
            }
            // an explicit value beats a bare flag
            options.insert(key, value);
            Ok(())
        }
    }
}

fn coerce(spec: &OptionSpec, token: &str) -> OptionValue {
    if spec.verbatim {
        OptionValue::String(token.to_string())
    } else {
        OptionValue::from_token(token)
    }
}

fn clap_message(err: &clap::Error) -> String {
    let arg = match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => Some(arg.as_str()),
        _ => None,
    };
    let missing = matches!(
        err.get(ContextKind::InvalidValue),
        Some(ContextValue::String(value)) if value.is_empty()
    );

    match (err.kind(), arg) {
        (ErrorKind::UnknownArgument, Some(arg)) => {
            let name = arg.split_once('=').map_or(arg, |(name, _)| name);
            format!("Unknown option `{name}`")
        }
        (ErrorKind::InvalidValue, Some(arg)) if missing => {
            format!("option `{arg}` value is missing")
        }
        _ => {
            let rendered = err.to_string();
            let line = rendered.lines().next().unwrap_or_default();
            line.strip_prefix("error: ").unwrap_or(line).to_string()
        }
    }
}

/// Stores `value` at a dotted path, appending on repeats.
fn insert_path(options: &mut RawOptions, path: &[String], value: OptionValue) -> Result<(), String> {
    let Some((head, rest)) = path.split_first() else {
        return Ok(());
    };

    if rest.is_empty() {
        return match options.get_mut(head) {
            None => {
                options.insert(head.clone(), value);
                Ok(())
            }
            Some(OptionValue::Map(_)) => {
                Err(format!("`{head}` already holds dot notation options"))
            }
            Some(_) if value.is_map() => Err(format!("`{head}` already holds a plain value")),
            Some(existing) => {
                existing.append(value);
                Ok(())
            }
        };
    }

    let entry = options
        .entry(head.clone())
        .or_insert_with(|| OptionValue::Map(Default::default()));
    match entry {
        OptionValue::Map(nested) => insert_path(nested, rest, value),
        other => Err(format!(
            "cannot create property `{}` on {} `{other}`",
            rest[0],
            other.type_name()
        )),
    }
}

/// Returns `true` if `token` can be an option's value rather than a flag.
///
/// Negative numbers are values, so `--coverage.threshold -1` keeps its `-1`.
pub(crate) fn is_value_token(token: &str) -> bool {
    !token.starts_with('-') || token == "-" || is_negative_number(token)
}

fn is_negative_number(token: &str) -> bool {
    token.starts_with('-') && Number::parse(token).is_some()
}
