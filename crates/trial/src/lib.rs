//! The `trial` test runner CLI.
//!
//! Ties the pipeline together: arguments are parsed by `trial-args`,
//! dispatched and normalized by `trial-dispatch`, and handed to an
//! [`Engine`] by the [`orchestrator`]. The binary in `main.rs` is a thin
//! wrapper over [`run`] with stdout and stderr plugged in.
//!
//! # Example
//!
//! ```rust
//! use trial::{run, PrintEngine, EXIT_SUCCESS};
//! use trial_args::CliConfig;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let engine = PrintEngine::new(Vec::<u8>::new());
//! let args = vec!["run".to_string(), "./basic".to_string()];
//! let (mut out, mut err): (Vec<u8>, Vec<u8>) = (Vec::new(), Vec::new());
//!
//! let status = run(&CliConfig::default(), &args, &engine, &mut out, &mut err).await;
//! assert_eq!(status, EXIT_SUCCESS);
//!
//! let handoff: serde_json::Value = serde_json::from_slice(&engine.into_inner()).unwrap();
//! assert_eq!(handoff["filters"][0], "basic");
//! assert_eq!(handoff["options"]["run"], true);
//! # });
//! ```

pub mod cli;
pub mod engine;
pub mod help;
pub mod logging;
pub mod orchestrator;

pub use cli::run;
pub use engine::{Engine, Handoff, PrintEngine, PrintSession, Session};
pub use orchestrator::{execute, EXIT_ERROR, EXIT_SUCCESS};
