//! Error types for argument parsing.

use std::fmt;

use thiserror::Error;

/// The argument vector could not be classified into options and filters.
///
/// Carries the raw tokens so the conflict diagnoser can re-scan them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseFailure {
    /// What went wrong.
    pub message: String,
    /// The arguments as given, without the program name.
    pub tokens: Vec<String>,
}

impl ParseFailure {
    /// Create a parse failure for the given tokens.
    pub fn new(message: impl Into<String>, tokens: &[String]) -> Self {
        Self {
            message: message.into(),
            tokens: tokens.to_vec(),
        }
    }
}

/// A flag given both as a bare boolean and with dotted sub-keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// The bare flag as typed, e.g. `--coverage`.
    pub flag: String,
    /// Every dotted argument for that flag, with its value when one followed.
    pub dotted: Vec<String>,
}

/// A parse failure explained as boolean/dot-notation ambiguity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ConflictError {
    /// One entry per conflicting flag, in the order the flags appeared.
    pub conflicts: Vec<Conflict>,
    /// The failure this error replaces.
    #[source]
    pub source: ParseFailure,
}

impl fmt::Display for ConflictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, conflict) in self.conflicts.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "A boolean argument \"{flag}\" was used with dot notation arguments \"{dotted}\".\n\
                 Please specify the \"{flag}\" argument with dot notation as well: \"{flag}.enabled\"",
                flag = conflict.flag,
                dotted = conflict.dotted.join(" "),
            )?;
        }
        Ok(())
    }
}

/// Errors returned by [`parse_args`](crate::parse_args).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    /// The arguments are malformed in a way the diagnoser could not explain.
    #[error(transparent)]
    Parse(#[from] ParseFailure),

    /// A boolean flag was mixed with its own dotted sub-options.
    #[error(transparent)]
    Conflict(#[from] ConflictError),
}

/// Result type for argument parsing.
pub type Result<T> = std::result::Result<T, ArgsError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn failure() -> ParseFailure {
        ParseFailure::new("boom", &["--coverage".to_string()])
    }

    #[test]
    fn parse_failure_displays_message() {
        assert_eq!(failure().to_string(), "boom");
        assert_eq!(failure().tokens, vec!["--coverage"]);
    }

    #[test]
    fn conflict_message_single() {
        let err = ConflictError {
            conflicts: vec![Conflict {
                flag: "--coverage".into(),
                dotted: vec!["--coverage.reporter text".into()],
            }],
            source: failure(),
        };
        assert_eq!(
            err.to_string(),
            "A boolean argument \"--coverage\" was used with dot notation arguments \"--coverage.reporter text\".\n\
             Please specify the \"--coverage\" argument with dot notation as well: \"--coverage.enabled\""
        );
    }

    #[test]
    fn conflict_message_joins_lines() {
        let err = ConflictError {
            conflicts: vec![
                Conflict {
                    flag: "--coverage".into(),
                    dotted: vec!["--coverage.all".into()],
                },
                Conflict {
                    flag: "--api".into(),
                    dotted: vec!["--api.port 3000".into(), "--api.host".into()],
                },
            ],
            source: failure(),
        };
        let message = err.to_string();
        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("\"--api.port 3000 --api.host\""));
        assert!(lines[3].ends_with("\"--api.enabled\""));
    }

    #[test]
    fn args_error_is_transparent() {
        let err = ArgsError::from(failure());
        assert_eq!(err.to_string(), "boom");
    }
}
