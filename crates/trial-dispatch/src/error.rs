//! Error types for dispatch.

use std::io;

use thiserror::Error;

/// A raw option value does not fit the typed field it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// The option was repeated but only one value is meaningful.
    #[error("option \"--{option}\" accepts a single value, got {count}")]
    MultipleValues { option: String, count: usize },

    /// The value has the wrong shape.
    #[error("option \"--{option}\" expects {expected}, got {actual}")]
    InvalidType {
        option: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl OptionsError {
    /// Create a type mismatch error.
    pub fn invalid_type(option: impl Into<String>, expected: &'static str, actual: &'static str) -> Self {
        Self::InvalidType {
            option: option.into(),
            expected,
            actual,
        }
    }
}

/// Errors that can occur while turning parsed arguments into an invocation.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The parser produced a subcommand this dispatcher does not route.
    #[error("unknown command \"{0}\"")]
    UnknownCommand(String),

    /// An option value could not be typed.
    #[error(transparent)]
    Options(#[from] OptionsError),

    /// Writing a mode warning failed.
    #[error("failed to write warning: {0}")]
    Io(#[from] io::Error),
}

/// Result type for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_error_display() {
        let err = OptionsError::MultipleValues {
            option: "root".into(),
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "option \"--root\" accepts a single value, got 2"
        );

        let err = OptionsError::invalid_type("watch", "a boolean", "a string");
        assert_eq!(
            err.to_string(),
            "option \"--watch\" expects a boolean, got a string"
        );
    }

    #[test]
    fn dispatch_error_wraps_options_error() {
        let err: DispatchError = OptionsError::invalid_type("coverage", "a boolean", "a list").into();
        assert_eq!(
            err.to_string(),
            "option \"--coverage\" expects a boolean, got a list"
        );
    }
}
