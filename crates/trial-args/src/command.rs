//! The clap command derived from the option table.
//!
//! The same [`Command`] parses arguments and renders help, so a registered
//! option is accepted and documented from a single table entry. Dot-notation
//! keys cannot be declared to clap; the parser lifts them out of the argument
//! vector before clap sees it.

use clap::{Arg, ArgAction, Command};

use crate::config::CliConfig;
use crate::schema::{OptionSpec, ValueKind};

/// Id of the positional argument collecting the subcommand and filters.
pub const POSITIONALS: &str = "filters";

/// Builds the clap command for `config`.
///
/// The command takes no binary name and has no built-in help or version
/// flags; `--help` and `--version` are ordinary table entries.
pub fn command(config: &CliConfig) -> Command {
    let mut cmd = Command::new(config.name)
        .no_binary_name(true)
        .args_override_self(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .disable_help_subcommand(true)
        .arg(
            Arg::new(POSITIONALS)
                .action(ArgAction::Append)
                .num_args(1..)
                .allow_negative_numbers(true)
                .hide(true),
        );

    for spec in config.options {
        cmd = cmd.arg(arg(spec));
    }
    cmd
}

fn arg(spec: &OptionSpec) -> Arg {
    let mut arg = Arg::new(spec.long).long(spec.long).help(spec.description);
    if let Some(short) = spec.short {
        arg = arg.short(short);
    }
    // --testTimeout is accepted for --test-timeout
    let key = spec.key();
    if !spec.is_negated() && key != spec.long {
        arg = arg.alias(key);
    }

    arg = match spec.value {
        ValueKind::Flag => arg.action(ArgAction::SetTrue),
        ValueKind::Required(name) => arg
            .action(ArgAction::Append)
            .value_name(name)
            .allow_negative_numbers(true),
        ValueKind::Optional(name) => arg
            .action(ArgAction::Append)
            .value_name(name)
            .num_args(0..=1)
            .default_missing_value("true")
            .allow_negative_numbers(true),
    };
    if let Some(default) = spec.default {
        arg = arg.default_value(default);
    }
    arg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(line: &str) -> clap::ArgMatches {
        command(&CliConfig::default())
            .try_get_matches_from(line.split_whitespace())
            .unwrap()
    }

    #[test]
    fn command_is_well_formed() {
        command(&CliConfig::default()).debug_assert();
    }

    #[test]
    fn camel_case_alias() {
        let m = matches("--testTimeout 100 --singleThread");
        let timeout: Vec<&String> = m.get_many("test-timeout").unwrap().collect();
        assert_eq!(timeout, vec!["100"]);
        assert!(m.get_flag("single-thread"));
    }

    #[test]
    fn repeated_flag_is_accepted() {
        assert!(matches("--ui --ui").get_flag("ui"));
    }

    #[test]
    fn optional_value_without_value_is_true() {
        let m = matches("--changed --ui");
        let changed: Vec<&String> = m.get_many("changed").unwrap().collect();
        assert_eq!(changed, vec!["true"]);
    }

    #[test]
    fn positionals_keep_order_around_flags() {
        let m = matches("run --ui basic -1");
        let filters: Vec<&String> = m.get_many(POSITIONALS).unwrap().collect();
        assert_eq!(filters, vec!["run", "basic", "-1"]);
    }
}
