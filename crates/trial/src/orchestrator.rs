//! Run orchestration: start the engine, then wait for it or shut it down.
//!
//! This is the single top-level error boundary. Any failure from the engine
//! is reported under an "Unhandled Error" banner and turned into exit
//! status 1; nothing is retried.

use std::io::{self, Write};

use console::{measure_text_width, style, Term};
use log::{debug, error};
use trial_dispatch::Invocation;

use crate::engine::{Engine, Session};

/// Exit status for a completed run.
pub const EXIT_SUCCESS: u8 = 0;

/// Exit status for any failure.
pub const EXIT_ERROR: u8 = 1;

const BANNER_LABEL: &str = " Unhandled Error ";
const DIVIDER: char = '⎯';
const DEFAULT_WIDTH: usize = 80;

/// Hands the invocation to the engine and returns the exit status.
///
/// Failures are written to `stderr`: the banner first, then the error with
/// its cause chain.
pub async fn execute<E: Engine>(engine: &E, invocation: Invocation, stderr: &mut dyn Write) -> u8 {
    match drive(engine, invocation).await {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            if let Err(io_err) = report_unhandled(&err, terminal_width(), stderr) {
                error!("failed to report engine error: {io_err}");
            }
            EXIT_ERROR
        }
    }
}

async fn drive<E: Engine>(engine: &E, invocation: Invocation) -> anyhow::Result<()> {
    let Invocation {
        mode,
        filters,
        options,
    } = invocation;

    let mut session = engine.start(mode, filters, options).await?;
    if session.should_keep_serving() {
        debug!("session keeps serving");
        session.serve().await
    } else {
        debug!("session done, shutting down");
        session.shutdown().await
    }
}

fn report_unhandled(err: &anyhow::Error, width: usize, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", banner(width))?;
    writeln!(out, "{}", style(format!("{err:?}")).red().for_stderr())?;
    writeln!(out)?;
    writeln!(out)?;
    out.flush()
}

fn terminal_width() -> usize {
    Term::stderr()
        .size_checked()
        .map(|(_, cols)| usize::from(cols))
        .unwrap_or(DEFAULT_WIDTH)
}

/// A full-width divider with the label centred in it.
fn banner(width: usize) -> String {
    let label_width = measure_text_width(BANNER_LABEL);
    let rest = width.saturating_sub(label_width);
    let left = rest / 2;
    let right = rest - left;
    format!(
        "{}{}{}",
        style(DIVIDER.to_string().repeat(left)).red().for_stderr(),
        style(BANNER_LABEL).bold().white().on_red().for_stderr(),
        style(DIVIDER.to_string().repeat(right)).red().for_stderr(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::strip_ansi_codes;

    #[test]
    fn banner_fills_width() {
        let line = banner(40);
        let plain = strip_ansi_codes(&line);
        assert_eq!(measure_text_width(&plain), 40);
        assert!(plain.contains(" Unhandled Error "));
        assert!(plain.starts_with('⎯'));
        assert!(plain.ends_with('⎯'));
    }

    #[test]
    fn banner_narrower_than_label() {
        let plain = strip_ansi_codes(&banner(4)).to_string();
        assert_eq!(plain, " Unhandled Error ");
    }

    #[test]
    fn report_writes_banner_then_chain() {
        let err = anyhow::anyhow!("port in use").context("failed to start runner");
        let mut out: Vec<u8> = Vec::new();
        report_unhandled(&err, 60, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let plain = strip_ansi_codes(&text);

        let banner_at = plain.find("Unhandled Error").unwrap();
        let error_at = plain.find("failed to start runner").unwrap();
        assert!(banner_at < error_at);
        assert!(plain.contains("port in use"));
        assert!(plain.ends_with("\n\n"));
    }
}
