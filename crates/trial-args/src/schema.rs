//! The static option table.
//!
//! Every flag the CLI understands is registered here once, as plain data.
//! The parser consults the table to decide whether a flag takes a value,
//! the help renderer reads descriptions from it, and absent options pick up
//! their defaults from it. There is no validation logic in this module.

/// Whether an option consumes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Boolean flag (`--watch`). Absent unless given.
    Flag,
    /// Requires a value (`--root <path>`). The string is the value name.
    Required(&'static str),
    /// Takes a value when one follows, otherwise acts as `true` (`--api [api]`).
    Optional(&'static str),
}

/// One registered option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    /// Long name as typed after `--`, e.g. `single-thread`.
    pub long: &'static str,
    /// Single-letter alias typed after `-`.
    pub short: Option<char>,
    /// Value handling.
    pub value: ValueKind,
    /// Help text.
    pub description: &'static str,
    /// Token applied when the option is absent.
    pub default: Option<&'static str>,
    /// Values are kept as typed, never read as numbers or booleans.
    pub verbatim: bool,
}

impl OptionSpec {
    const fn flag(long: &'static str, description: &'static str) -> Self {
        Self {
            long,
            short: None,
            value: ValueKind::Flag,
            description,
            default: None,
            verbatim: false,
        }
    }

    const fn required(long: &'static str, name: &'static str, description: &'static str) -> Self {
        Self {
            long,
            short: None,
            value: ValueKind::Required(name),
            description,
            default: None,
            verbatim: false,
        }
    }

    const fn optional(long: &'static str, name: &'static str, description: &'static str) -> Self {
        Self {
            long,
            short: None,
            value: ValueKind::Optional(name),
            description,
            default: None,
            verbatim: false,
        }
    }

    const fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    const fn default(mut self, token: &'static str) -> Self {
        self.default = Some(token);
        self
    }

    const fn verbatim(mut self) -> Self {
        self.verbatim = true;
        self
    }

    /// Returns `true` for boolean flags.
    pub fn is_flag(&self) -> bool {
        self.value == ValueKind::Flag
    }

    /// Returns `true` for negated registrations such as `no-color`.
    pub fn is_negated(&self) -> bool {
        self.is_flag() && self.long.starts_with("no-")
    }

    /// The key this option is stored under.
    ///
    /// Kebab-case becomes camelCase and a `no-` prefix is dropped, so
    /// `--test-timeout` is stored as `testTimeout` and `--no-color` as `color`.
    pub fn key(&self) -> String {
        let name = if self.is_negated() {
            &self.long[3..]
        } else {
            self.long
        };
        camel_case(name)
    }
}

/// Converts a kebab-case flag name to camelCase.
///
/// Names without dashes are returned unchanged, so `passWithNoTests` stays
/// as typed.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '-' {
            upper = !out.is_empty();
            continue;
        }
        if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Subcommands, in the order they are listed in help.
pub const COMMANDS: &[(&str, &str)] = &[
    ("run", "Run tests once, without watch mode"),
    ("related", "Run only tests that cover the given source files"),
    ("watch", "Run tests in watch mode"),
    ("dev", "Alias of watch"),
    ("bench", "Run benchmarks (experimental)"),
    ("typecheck", "Run type checks (experimental)"),
];

/// Every option the CLI accepts.
pub const OPTIONS: &[OptionSpec] = &[
    OptionSpec::required("root", "path", "Root path")
        .short('r')
        .verbatim(),
    OptionSpec::required("config", "path", "Path to config file")
        .short('c')
        .verbatim(),
    OptionSpec::flag("update", "Update snapshot").short('u'),
    OptionSpec::flag("watch", "Enable watch mode").short('w'),
    OptionSpec::required(
        "testNamePattern",
        "pattern",
        "Run tests with full names matching the specified regexp pattern",
    )
    .short('t')
    .verbatim(),
    OptionSpec::required("dir", "path", "Base directory to scan for the test files").verbatim(),
    OptionSpec::flag("ui", "Enable UI"),
    OptionSpec::flag("open", "Open UI automatically (default: !process.env.CI)"),
    OptionSpec::optional(
        "api",
        "api",
        "Serve API, available options: --api.port <port>, --api.host [host] and --api.strictPort",
    ),
    OptionSpec::flag("threads", "Enabled threads (default: true)"),
    OptionSpec::flag(
        "single-thread",
        "Run tests inside a single thread, requires --threads (default: false)",
    ),
    OptionSpec::flag("silent", "Silent console output from tests"),
    OptionSpec::flag("hideSkippedTests", "Hide logs for skipped tests"),
    OptionSpec::flag(
        "isolate",
        "Isolate environment for each test file (default: true)",
    ),
    OptionSpec::required("reporter", "name", "Specify reporters"),
    OptionSpec::required(
        "outputFile",
        "filename/-s",
        "Write test results to a file when supported reporter is also specified, use dot notation for individual outputs of multiple reporters",
    )
    .verbatim(),
    OptionSpec::flag("coverage", "Enable coverage report"),
    OptionSpec::flag("run", "Disable watch mode"),
    OptionSpec::required("mode", "name", "Override Vite mode (default: test)"),
    OptionSpec::flag("globals", "Inject apis globally"),
    OptionSpec::flag("dom", "Mock browser api with happy-dom"),
    OptionSpec::optional(
        "browser",
        "options",
        "Run tests in the browser (default: false)",
    ),
    OptionSpec::required(
        "environment",
        "env",
        "Specify runner environment, if not running in the browser (default: node)",
    ),
    OptionSpec::flag("passWithNoTests", "Pass when no tests found"),
    OptionSpec::flag("logHeapUsage", "Show the size of heap for each test"),
    OptionSpec::flag(
        "allowOnly",
        "Allow tests and suites that are marked as only (default: !process.env.CI)",
    ),
    OptionSpec::flag(
        "dangerouslyIgnoreUnhandledErrors",
        "Ignore any unhandled errors that occur",
    ),
    OptionSpec::required(
        "shard",
        "shard",
        "Test suite shard to execute in a format of <index>/<count>",
    ),
    OptionSpec::optional(
        "changed",
        "since",
        "Run tests that are affected by the changed files (default: false)",
    ),
    OptionSpec::required(
        "sequence",
        "options",
        "Define in what order to run tests (use --sequence.shuffle to run tests in random order, use --sequence.concurrent to run tests in parallel)",
    ),
    OptionSpec::required(
        "segfaultRetry",
        "times",
        "Return tests on segment fault (default: 0)",
    )
    .default("0"),
    OptionSpec::flag("no-color", "Removes colors from the console output"),
    OptionSpec::flag("inspect", "Enable Node.js inspector"),
    OptionSpec::flag("inspect-brk", "Enable Node.js inspector with break"),
    OptionSpec::required(
        "test-timeout",
        "time",
        "Default timeout of a test in milliseconds (default: 5000)",
    ),
    OptionSpec::required(
        "bail",
        "number",
        "Stop test execution when given number of tests have failed",
    )
    .default("0"),
    OptionSpec::required(
        "retry",
        "times",
        "Retry the test specific number of times if it fails",
    )
    .default("0"),
    OptionSpec::flag("help", "Display this message").short('h'),
    OptionSpec::flag("version", "Display version number").short('v'),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn long_names_are_unique() {
        let mut seen = HashSet::new();
        for spec in OPTIONS {
            assert!(seen.insert(spec.long), "duplicate option --{}", spec.long);
        }
    }

    #[test]
    fn keys_are_unique() {
        let mut seen = HashSet::new();
        for spec in OPTIONS {
            assert!(seen.insert(spec.key()), "duplicate key {}", spec.key());
        }
    }

    #[test]
    fn short_aliases_are_unique() {
        let mut seen = HashSet::new();
        for short in OPTIONS.iter().filter_map(|s| s.short) {
            assert!(seen.insert(short), "duplicate alias -{short}");
        }
    }

    #[test]
    fn booleans_default_to_absent() {
        for spec in OPTIONS.iter().filter(|s| s.is_flag()) {
            assert_eq!(spec.default, None, "--{} has a default", spec.long);
        }
    }

    #[test]
    fn camel_case_conversion() {
        assert_eq!(camel_case("single-thread"), "singleThread");
        assert_eq!(camel_case("test-timeout"), "testTimeout");
        assert_eq!(camel_case("inspect-brk"), "inspectBrk");
        assert_eq!(camel_case("passWithNoTests"), "passWithNoTests");
        assert_eq!(camel_case("root"), "root");
    }

    #[test]
    fn negated_flag_key() {
        let spec = OPTIONS.iter().find(|s| s.long == "no-color").unwrap();
        assert!(spec.is_negated());
        assert_eq!(spec.key(), "color");
    }

    #[test]
    fn path_and_pattern_values_are_verbatim() {
        let verbatim: Vec<_> = OPTIONS
            .iter()
            .filter(|s| s.verbatim)
            .map(|s| s.long)
            .collect();
        assert_eq!(
            verbatim,
            vec!["root", "config", "testNamePattern", "dir", "outputFile"]
        );
    }

    #[test]
    fn numeric_defaults() {
        let defaults: Vec<_> = OPTIONS
            .iter()
            .filter_map(|s| s.default.map(|d| (s.long, d)))
            .collect();
        assert_eq!(
            defaults,
            vec![("segfaultRetry", "0"), ("bail", "0"), ("retry", "0")]
        );
    }
}
