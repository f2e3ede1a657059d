//! Parser configuration.

use crate::schema::{camel_case, OptionSpec, COMMANDS, OPTIONS};
use crate::value::OptionValue;

/// Everything the parser needs to know about the CLI surface.
///
/// The option table lives in a static, but the parser only ever sees it
/// through this value, so tests can run against a reduced table.
#[derive(Debug, Clone, Copy)]
pub struct CliConfig {
    /// Program name used in help and version output.
    pub name: &'static str,
    /// Version string printed by `--version`.
    pub version: &'static str,
    /// Registered options.
    pub options: &'static [OptionSpec],
    /// Subcommand names and their help text.
    pub commands: &'static [(&'static str, &'static str)],
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            name: "trial",
            version: env!("CARGO_PKG_VERSION"),
            options: OPTIONS,
            commands: COMMANDS,
        }
    }
}

impl CliConfig {
    /// Finds an option by the name typed after `--`.
    ///
    /// Both the registered spelling and its camelCase key match, so
    /// `--test-timeout` and `--testTimeout` resolve to the same entry.
    /// Names with a stray or doubled dash never match.
    pub fn find_long(&self, name: &str) -> Option<&'static OptionSpec> {
        self.options
            .iter()
            .find(|spec| spec.long == name)
            .or_else(|| {
                if name.starts_with('-') || name.ends_with('-') || name.contains("--") {
                    return None;
                }
                let key = camel_case(name);
                self.options
                    .iter()
                    .find(|spec| !spec.is_negated() && spec.key() == key)
            })
    }

    /// Finds an option by its single-letter alias.
    pub fn find_short(&self, short: char) -> Option<&'static OptionSpec> {
        self.options.iter().find(|spec| spec.short == Some(short))
    }

    /// Keys and values of every option that has a default.
    pub fn defaults(&self) -> impl Iterator<Item = (String, OptionValue)> + '_ {
        self.options.iter().filter_map(|spec| {
            spec.default.map(|token| (spec.key(), OptionValue::from_token(token)))
        })
    }

    /// Returns `true` if `name` is a registered subcommand.
    pub fn is_command(&self, name: &str) -> bool {
        self.commands.iter().any(|(command, _)| *command == name)
    }
}
