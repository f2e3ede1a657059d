//! The command-line pipeline.
//!
//! ```text
//! argv → parse_args → (--help | --version) → resolve → normalize_invocation → execute
//! ```
//!
//! Parse, conflict and option errors are reported as `error: <message>` and
//! end the run with exit status 1 before anything is dispatched.

use std::fmt::Display;
use std::io::Write;

use log::{debug, error};
use trial_args::{parse_args, CliConfig};
use trial_dispatch::{normalize_invocation, resolve};

use crate::engine::Engine;
use crate::help::{render_help, render_version};
use crate::orchestrator::{execute, EXIT_ERROR, EXIT_SUCCESS};

/// Runs the CLI over `args` (without the program name) and returns the exit
/// status.
///
/// Help and version go to `out`; warnings, errors and the engine failure
/// banner go to `err`.
pub async fn run<E: Engine>(
    config: &CliConfig,
    args: &[String],
    engine: &E,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> u8 {
    let mut parsed = match parse_args(config, args) {
        Ok(parsed) => parsed,
        Err(e) => return fail(&e, err),
    };
    debug!(
        "parsed command={:?} filters={:?} options={:?}",
        parsed.command,
        parsed.filters,
        parsed.options.keys().collect::<Vec<_>>()
    );

    if parsed.take_flag("help") {
        return print(out, render_help(config));
    }
    if parsed.take_flag("version") {
        return print(out, render_version(config));
    }

    let invocation = match resolve(parsed, &mut *err) {
        Ok(invocation) => normalize_invocation(invocation),
        Err(e) => return fail(&e, err),
    };
    execute(engine, invocation, err).await
}

fn print(out: &mut dyn Write, text: String) -> u8 {
    match writeln!(out, "{}", text.trim_end()) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            error!("failed to write output: {e}");
            EXIT_ERROR
        }
    }
}

fn fail(e: &dyn Display, err: &mut dyn Write) -> u8 {
    if let Err(io_err) = writeln!(err, "error: {e}") {
        error!("failed to write error: {io_err}");
    }
    EXIT_ERROR
}
