//! Boolean/dot-notation conflict diagnosis.
//!
//! `--coverage --coverage.reporter text` is the most common way to trip the
//! parser: `--coverage` asks for a plain `true`, `--coverage.reporter` asks
//! for a nested map, and the two cannot be stored together. The parser only
//! knows that it failed. This module re-scans the tokens after a failure and,
//! when that is the cause, replaces the failure with a [`ConflictError`]
//! telling the user to write `--coverage.enabled` instead.
//!
//! Scanning works on whole tokens. A filter that happens to contain
//! `--coverage.` somewhere in its text never starts a token with it, so it
//! cannot produce a false report. Tokens after `--` are positional and are
//! not scanned at all.

use log::debug;

use crate::error::{ArgsError, Conflict, ConflictError, ParseFailure};
use crate::parser::is_value_token;

/// Finds every bare flag that also appears with dotted sub-keys.
///
/// Flags are reported once each, in the order they first appear. Each dotted
/// argument is listed together with its value when the value was a separate
/// token (`--coverage.reporter text`).
pub fn find_conflicts(tokens: &[String]) -> Vec<Conflict> {
    let scanned = scanned_tokens(tokens);
    let mut conflicts: Vec<Conflict> = Vec::new();

    for token in scanned {
        if !is_bare_long_flag(token) || conflicts.iter().any(|c| c.flag == *token) {
            continue;
        }

        let prefix = format!("{token}.");
        let dotted: Vec<String> = scanned
            .iter()
            .enumerate()
            .filter(|(_, candidate)| candidate.starts_with(&prefix))
            .map(|(i, candidate)| with_value(scanned, i, candidate))
            .collect();

        if !dotted.is_empty() {
            conflicts.push(Conflict {
                flag: token.clone(),
                dotted,
            });
        }
    }

    conflicts
}

/// Explains a parse failure if it was caused by a conflict.
///
/// With no conflict in the tokens the original failure is returned
/// unchanged, so unrelated mistakes are not masked.
pub fn diagnose(failure: ParseFailure) -> ArgsError {
    let conflicts = find_conflicts(&failure.tokens);
    if conflicts.is_empty() {
        return ArgsError::Parse(failure);
    }

    debug!(
        "reclassified parse failure as {} dot-notation conflict(s)",
        conflicts.len()
    );
    ArgsError::Conflict(ConflictError {
        conflicts,
        source: failure,
    })
}

fn scanned_tokens(tokens: &[String]) -> &[String] {
    match tokens.iter().position(|t| t == "--") {
        Some(end) => &tokens[..end],
        None => tokens,
    }
}

fn is_bare_long_flag(token: &str) -> bool {
    token.len() > 2 && token.starts_with("--") && !token.contains('.') && !token.contains('=')
}

fn with_value(tokens: &[String], index: usize, token: &str) -> String {
    if token.contains('=') {
        return token.to_string();
    }
    match tokens.get(index + 1) {
        Some(next) if is_value_token(next) => format!("{token} {next}"),
        _ => token.to_string(),
    }
}
