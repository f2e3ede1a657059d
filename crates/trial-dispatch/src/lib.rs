//! Run-mode dispatch and option normalization for the `trial` CLI.
//!
//! `trial-dispatch` sits between argument parsing (`trial-args`) and the
//! runner engine. It owns the typed options object and the rules that turn
//! a parsed command line into an [`Invocation`].
//!
//! # Pipeline Position
//!
//! ```text
//! ParsedArgs
//!   → resolve   (CliOptions::from_raw, then dispatch on the subcommand)
//!   → normalize_invocation
//!   → Invocation { mode, filters, options }   handed to the engine
//! ```
//!
//! # Example
//!
//! ```rust
//! use trial_args::{parse_args, CliConfig};
//! use trial_dispatch::{normalize_invocation, resolve, RunMode};
//!
//! let argv: Vec<String> = ["related", "./src/a.ts", "--root", "./app/"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! let parsed = parse_args(&CliConfig::default(), &argv).unwrap();
//! let invocation = normalize_invocation(resolve(parsed, &mut std::io::sink()).unwrap());
//!
//! assert_eq!(invocation.mode, RunMode::Test);
//! assert_eq!(invocation.options.root.as_deref(), Some("app/"));
//! assert_eq!(invocation.options.pass_with_no_tests, Some(true));
//! ```

mod dispatch;
mod error;
mod normalize;
mod options;

pub use dispatch::{dispatch, resolve, Command, Invocation, RunMode};
pub use error::{DispatchError, OptionsError, Result};
pub use normalize::{normalize_filters, normalize_invocation, normalize_options, normalize_path};
pub use options::{CliOptions, CoverageOptions, OneOrMany};
