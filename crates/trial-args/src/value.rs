//! Raw option values produced by the argument parser.
//!
//! The parser does not know the final shape of every option, so it stores
//! what it sees as an [`OptionValue`]: a scalar, a list of repeated values,
//! or a nested map built from dot-notation keys (`--coverage.exclude`).
//! Typed views are built on top of this by the dispatch layer.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Options keyed by their camelCase name, in stable order.
pub type RawOptions = BTreeMap<String, OptionValue>;

/// A parsed option value.
///
/// # Example
///
/// ```
/// use trial_args::{Number, OptionValue};
///
/// assert_eq!(OptionValue::from_token("true"), OptionValue::Bool(true));
/// assert_eq!(OptionValue::from_token("3"), OptionValue::Number(Number::I64(3)));
/// assert_eq!(OptionValue::from_token("src"), OptionValue::String("src".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Boolean flag value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// Any other text.
    String(String),
    /// The option was given more than once.
    List(Vec<OptionValue>),
    /// Nested keys from dot notation.
    Map(BTreeMap<String, OptionValue>),
}

impl OptionValue {
    /// Coerces a command-line token into a value.
    ///
    /// `true` and `false` become booleans, numeric literals become numbers,
    /// anything else is kept as a string.
    pub fn from_token(token: &str) -> Self {
        match token {
            "true" => OptionValue::Bool(true),
            "false" => OptionValue::Bool(false),
            _ => Number::parse(token)
                .map(OptionValue::Number)
                .unwrap_or_else(|| OptionValue::String(token.to_string())),
        }
    }

    /// Returns `true` if this is a `Map` value.
    pub fn is_map(&self) -> bool {
        matches!(self, OptionValue::Map(_))
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the nested map, if present.
    pub fn as_map(&self) -> Option<&BTreeMap<String, OptionValue>> {
        match self {
            OptionValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Renders a scalar as the text the user typed.
    ///
    /// Returns `None` for lists and maps.
    pub fn to_scalar_string(&self) -> Option<String> {
        match self {
            OptionValue::Bool(b) => Some(b.to_string()),
            OptionValue::Number(n) => Some(n.to_string()),
            OptionValue::String(s) => Some(s.clone()),
            OptionValue::List(_) | OptionValue::Map(_) => None,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            OptionValue::Bool(_) => "a boolean",
            OptionValue::Number(_) => "a number",
            OptionValue::String(_) => "a string",
            OptionValue::List(_) => "a list",
            OptionValue::Map(_) => "nested options",
        }
    }

    /// Appends another occurrence of the same option, promoting to a list.
    pub(crate) fn append(&mut self, value: OptionValue) {
        match self {
            OptionValue::List(items) => items.push(value),
            other => {
                let first = std::mem::replace(other, OptionValue::List(Vec::new()));
                *other = OptionValue::List(vec![first, value]);
            }
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Number(n) => write!(f, "{n}"),
            OptionValue::String(s) => f.write_str(s),
            OptionValue::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            OptionValue::Map(map) => {
                let parts: Vec<String> = map.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

/// Numeric option value.
///
/// Integers keep full precision; anything with a fraction or exponent is
/// stored as floating point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Parses a decimal literal such as `12`, `-3`, `0.5` or `1e3`.
    ///
    /// Words that `f64::from_str` would accept (`inf`, `NaN`) are rejected so
    /// that test name patterns are never mistaken for numbers.
    pub fn parse(token: &str) -> Option<Number> {
        if !looks_numeric(token) {
            return None;
        }
        if let Ok(n) = token.parse::<i64>() {
            return Some(Number::I64(n));
        }
        token
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Number::F64)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

// [+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?
fn looks_numeric(token: &str) -> bool {
    let bytes = token.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }
    if digits == 0 {
        return false;
    }
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}
