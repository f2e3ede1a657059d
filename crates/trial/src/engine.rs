//! The runner engine boundary.
//!
//! Test discovery, scheduling, watching and reporting all live behind
//! [`Engine`]. This crate only starts it with a resolved invocation and
//! decides, from the returned [`Session`], whether to wait for it or shut
//! it down.
//!
//! [`PrintEngine`] is the engine the binary ships with: it writes the
//! resolved handoff as JSON and stops.

use std::cell::RefCell;
use std::io::{self, Write};

use anyhow::Context;
use log::debug;
use serde::Serialize;
use trial_dispatch::{CliOptions, RunMode};

/// Starts a run.
#[allow(async_fn_in_trait)]
pub trait Engine {
    /// The running session this engine hands back.
    type Session: Session;

    /// Starts the runner in `mode` with the given filters and options.
    async fn start(
        &self,
        mode: RunMode,
        filters: Vec<String>,
        options: CliOptions,
    ) -> anyhow::Result<Self::Session>;
}

/// A started run.
#[allow(async_fn_in_trait)]
pub trait Session {
    /// Whether the session stays alive after start, as in watch mode.
    fn should_keep_serving(&self) -> bool;

    /// Waits until the session stops serving.
    async fn serve(&mut self) -> anyhow::Result<()>;

    /// Asks the session to release its resources and stop.
    async fn shutdown(self) -> anyhow::Result<()>;
}

/// What an engine receives, in serializable form.
#[derive(Debug, Serialize)]
pub struct Handoff<'a> {
    pub mode: RunMode,
    pub filters: &'a [String],
    pub options: &'a CliOptions,
}

/// An engine that prints the handoff as pretty JSON.
#[derive(Debug)]
pub struct PrintEngine<W: Write = io::Stdout> {
    out: RefCell<W>,
}

impl PrintEngine<io::Stdout> {
    /// Prints to stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> PrintEngine<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> Engine for PrintEngine<W> {
    type Session = PrintSession;

    async fn start(
        &self,
        mode: RunMode,
        filters: Vec<String>,
        options: CliOptions,
    ) -> anyhow::Result<PrintSession> {
        let handoff = Handoff {
            mode,
            filters: &filters,
            options: &options,
        };
        let json = serde_json::to_string_pretty(&handoff).context("failed to encode handoff")?;
        let mut out = self.out.borrow_mut();
        writeln!(out, "{json}").context("failed to write handoff")?;
        out.flush()?;
        debug!("handed off mode={mode} filters={}", filters.len());
        Ok(PrintSession)
    }
}

/// The session of a [`PrintEngine`]; it never keeps serving.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrintSession;

impl Session for PrintSession {
    fn should_keep_serving(&self) -> bool {
        false
    }

    async fn serve(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn shutdown(self) -> anyhow::Result<()> {
        debug!("print session closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use trial_dispatch::CoverageOptions;

    #[tokio::test]
    async fn print_engine_writes_handoff() {
        let engine = PrintEngine::new(Vec::<u8>::new());
        let options = CliOptions {
            watch: Some(true),
            coverage: Some(CoverageOptions {
                enabled: Some(true),
                ..CoverageOptions::default()
            }),
            ..CliOptions::default()
        };
        let session = engine
            .start(RunMode::Test, vec!["basic".into()], options)
            .await
            .unwrap();
        assert!(!session.should_keep_serving());
        session.shutdown().await.unwrap();

        let written: serde_json::Value = serde_json::from_slice(&engine.into_inner()).unwrap();
        assert_eq!(
            written,
            json!({
                "mode": "test",
                "filters": ["basic"],
                "options": { "watch": true, "coverage": { "enabled": true } }
            })
        );
    }

    #[test]
    fn handoff_mode_names() {
        let options = CliOptions::default();
        let handoff = Handoff {
            mode: RunMode::Benchmark,
            filters: &[],
            options: &options,
        };
        assert_eq!(
            serde_json::to_value(&handoff).unwrap(),
            json!({ "mode": "benchmark", "filters": [], "options": {} })
        );
    }
}
