//! Log setup for the binary.
//!
//! Library crates only emit `log` records; this is the one place a logger is
//! installed. Records go to stderr so stdout stays clean for the engine.

use env_logger::{Builder, Env, Target};

/// Variable holding the log filter, in `env_logger` syntax.
pub const LOG_ENV: &str = "TRIAL_LOG";

/// Filter used when [`LOG_ENV`] is unset.
pub const DEFAULT_FILTER: &str = "warn";

/// Where the filter comes from.
pub fn env() -> Env<'static> {
    Env::new().filter_or(LOG_ENV, DEFAULT_FILTER)
}

/// Installs the global logger. Does nothing if one is already installed.
pub fn init() {
    let installed = Builder::from_env(env())
        .target(Target::Stderr)
        .format_timestamp(None)
        .try_init();
    if installed.is_ok() {
        log::debug!("logging initialised from `{LOG_ENV}`");
    }
}
